//! Turns typed requests into replies.
//!
//! The responder is purely functional over an injected dataset: every
//! question produces a [`Reply`] with prose, a structured payload, and
//! any recoverable problems. Nothing here is fatal; lookups that miss
//! and growth rates that cannot be computed come back as plain language.

use serde::Serialize;
use tracing::debug;

use crate::interpreter::{interpret, ChatQuery, ParseFailure, RequestKind};
use crate::{Company, FinancialDataset, FiscalYear, GrowthError, Metric};

/// A stored figure selected for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricFigure {
    pub metric: Metric,
    pub fiscal_year: FiscalYear,
    pub value_usd_m: f64,
}

/// A computed year-over-year growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricGrowth {
    pub metric: Metric,
    pub fiscal_year: FiscalYear,
    /// Ratio relative to the prior-year figure (0.05 means +5%).
    pub ratio: f64,
}

impl MetricGrowth {
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Structured body of a summary reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    pub company: Company,
    pub fiscal_year: FiscalYear,
    pub figures: Vec<MetricFigure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<MetricGrowth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income_growth: Option<MetricGrowth>,
}

/// Machine-readable payload attached to every reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyData {
    Values {
        company: Company,
        figures: Vec<MetricFigure>,
    },
    Growth {
        company: Company,
        rates: Vec<MetricGrowth>,
    },
    Summary(CompanySummary),
    Clarification,
}

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCode {
    NotFound,
    Undefined,
    NotUnderstood,
}

impl ProblemCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Undefined => "undefined",
            Self::NotUnderstood => "not_understood",
        }
    }
}

/// A recoverable problem encountered while answering, reported both as
/// prose and in the machine envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub code: ProblemCode,
    pub message: String,
}

impl Problem {
    fn new(code: ProblemCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Finished answer: prose plus the structured payload it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub data: ReplyData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<Problem>,
    /// Follow-up question offered to the user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Set when the question named no year and the latest covered year
    /// was used instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaulted_year: Option<FiscalYear>,
}

/// Answers typed requests against an injected dataset.
pub struct Responder<'a> {
    dataset: &'a FinancialDataset,
}

impl<'a> Responder<'a> {
    pub fn new(dataset: &'a FinancialDataset) -> Self {
        Self { dataset }
    }

    /// Interprets and answers in one step; parse failures become
    /// clarification replies rather than errors.
    pub fn answer(&self, input: &str) -> Reply {
        match interpret(input) {
            Ok(query) => self.respond(&query),
            Err(failure) => clarification(&failure),
        }
    }

    pub fn respond(&self, query: &ChatQuery) -> Reply {
        let company = query.company;

        let (year, defaulted_year) = match query.fiscal_year {
            Some(year) => (year, None),
            None => match self.dataset.latest_year(company) {
                Some(latest) => (latest, Some(latest)),
                None => return company_not_covered(company),
            },
        };

        debug!(%company, %year, kind = ?query.kind, "answering");
        let mut reply = match query.kind {
            RequestKind::Value => self.values_reply(company, &query.metrics, year),
            RequestKind::Growth => self.growth_reply(company, &query.metrics, year),
            RequestKind::Summary => self.summary_reply(company, year),
        };

        if let Some(latest) = defaulted_year {
            reply.defaulted_year = Some(latest);
            reply.text = format!(
                "Using {company}'s latest covered year, FY{latest}. {}",
                reply.text
            );
        }

        reply
    }

    fn values_reply(&self, company: Company, metrics: &[Metric], year: FiscalYear) -> Reply {
        if metrics.is_empty() {
            return clarification(&ParseFailure::MissingMetric { company });
        }

        let mut figures = Vec::new();
        let mut problems = Vec::new();
        let mut sentences = Vec::new();

        for &metric in metrics {
            match self.dataset.value(company, metric, year) {
                Some(value) => {
                    figures.push(MetricFigure {
                        metric,
                        fiscal_year: year,
                        value_usd_m: value,
                    });
                    let verb = if metric.is_plural() { "were" } else { "was" };
                    sentences.push(format!(
                        "{company}'s {metric} for FY{year} {verb} {}.",
                        format_usd_millions(value)
                    ));
                }
                None => {
                    let message = format!("No {metric} data for {company} in FY{year}.");
                    sentences.push(message.clone());
                    problems.push(Problem::new(ProblemCode::NotFound, message));
                }
            }
        }

        let suggestion = if figures.is_empty() {
            None
        } else {
            suggest_after_values(company, metrics, year)
        };

        Reply {
            text: sentences.join(" "),
            data: ReplyData::Values { company, figures },
            problems,
            suggestion,
            defaulted_year: None,
        }
    }

    fn growth_reply(&self, company: Company, metrics: &[Metric], year: FiscalYear) -> Reply {
        if metrics.is_empty() {
            return clarification(&ParseFailure::MissingMetric { company });
        }

        let mut rates = Vec::new();
        let mut problems = Vec::new();
        let mut sentences = Vec::new();

        for &metric in metrics {
            match self.dataset.year_over_year_growth(company, metric, year) {
                Ok(ratio) => {
                    let growth = MetricGrowth {
                        metric,
                        fiscal_year: year,
                        ratio,
                    };
                    sentences.push(format!(
                        "{company}'s {metric} growth for FY{year} was {:.2}%.",
                        growth.percent()
                    ));
                    rates.push(growth);
                }
                Err(error) => {
                    let (code, message) = growth_problem(&error);
                    sentences.push(message.clone());
                    problems.push(Problem::new(code, message));
                }
            }
        }

        let suggestion = (!rates.is_empty()).then(|| {
            format!(
                "Would you like to know about {company}'s other growth metrics \
                 or a summary of its financial health for FY{year}?"
            )
        });

        Reply {
            text: sentences.join(" "),
            data: ReplyData::Growth { company, rates },
            problems,
            suggestion,
            defaulted_year: None,
        }
    }

    fn summary_reply(&self, company: Company, year: FiscalYear) -> Reply {
        let figures: Vec<MetricFigure> = Metric::ALL
            .into_iter()
            .filter_map(|metric| {
                self.dataset
                    .value(company, metric, year)
                    .map(|value| MetricFigure {
                        metric,
                        fiscal_year: year,
                        value_usd_m: value,
                    })
            })
            .collect();

        if figures.is_empty() {
            let message = format!("No data for {company} in FY{year}.");
            return Reply {
                text: message.clone(),
                data: ReplyData::Summary(CompanySummary {
                    company,
                    fiscal_year: year,
                    figures,
                    revenue_growth: None,
                    net_income_growth: None,
                }),
                problems: vec![Problem::new(ProblemCode::NotFound, message)],
                suggestion: None,
                defaulted_year: None,
            };
        }

        let revenue_growth = self.growth_for_summary(company, Metric::TotalRevenue, year);
        let net_income_growth = self.growth_for_summary(company, Metric::NetIncome, year);

        let mut text = format!(
            "Here's a summary of {company}'s financial performance for FY{year}:\n"
        );
        for figure in &figures {
            text.push_str(&format!(
                "- {}: {}\n",
                figure.metric,
                format_usd_millions(figure.value_usd_m)
            ));
        }
        match (&revenue_growth, &net_income_growth) {
            (Some(revenue), Some(net_income)) => {
                text.push_str(&format!(
                    "- Revenue Growth (YoY): {:.2}%\n",
                    revenue.percent()
                ));
                text.push_str(&format!(
                    "- Net Income Growth (YoY): {:.2}%\n",
                    net_income.percent()
                ));
            }
            _ => {
                text.push_str(&format!(
                    "Growth data for FY{year} is not available (requires the previous \
                     year's data).\n"
                ));
            }
        }

        Reply {
            text,
            data: ReplyData::Summary(CompanySummary {
                company,
                fiscal_year: year,
                figures,
                revenue_growth,
                net_income_growth,
            }),
            problems: Vec::new(),
            suggestion: Some(String::from(
                "Is there a specific metric you'd like to dive deeper into, or \
                 perhaps compare another year's performance?",
            )),
            defaulted_year: None,
        }
    }

    fn growth_for_summary(
        &self,
        company: Company,
        metric: Metric,
        year: FiscalYear,
    ) -> Option<MetricGrowth> {
        self.dataset
            .year_over_year_growth(company, metric, year)
            .ok()
            .map(|ratio| MetricGrowth {
                metric,
                fiscal_year: year,
                ratio,
            })
    }
}

fn growth_problem(error: &GrowthError) -> (ProblemCode, String) {
    match *error {
        GrowthError::YearNotCovered {
            company,
            metric,
            year,
        } => (
            ProblemCode::NotFound,
            format!("No {metric} data for {company} in FY{year}."),
        ),
        GrowthError::PriorYearNotCovered {
            company,
            metric,
            year,
        } => (
            ProblemCode::Undefined,
            format!(
                "{company}'s {metric} growth for FY{year} is not available \
                 (requires the previous year's data)."
            ),
        ),
        GrowthError::ZeroBase {
            company,
            metric,
            year,
            base_year,
        } => (
            ProblemCode::Undefined,
            format!(
                "{company}'s {metric} growth for FY{year} is undefined \
                 (the FY{base_year} base figure is zero)."
            ),
        ),
    }
}

fn clarification(failure: &ParseFailure) -> Reply {
    let text = match failure {
        ParseFailure::MissingCompany => String::from(
            "I need a company name (Microsoft, Tesla, or Apple) to provide \
             financial insights. Please try again.",
        ),
        ParseFailure::AmbiguousCompany { candidates } => {
            let names: Vec<&str> = candidates
                .iter()
                .map(|company| company.display_name())
                .collect();
            format!(
                "I can only look at one company at a time. Did you mean {}?",
                names.join(" or ")
            )
        }
        ParseFailure::MissingMetric { company } => format!(
            "I'm not sure how to answer that about {company}. I can tell you \
             about its total revenue, net income, assets, liabilities, cash \
             flow, or their growth rates. Try asking 'What is Microsoft's \
             revenue for 2023?' or 'Summarise Apple's performance for 2022'."
        ),
    };

    Reply {
        text,
        data: ReplyData::Clarification,
        problems: vec![Problem::new(ProblemCode::NotUnderstood, failure.to_string())],
        suggestion: None,
        defaulted_year: None,
    }
}

fn company_not_covered(company: Company) -> Reply {
    let message = format!("No data available for {company} in the current dataset.");
    Reply {
        text: message.clone(),
        data: ReplyData::Clarification,
        problems: vec![Problem::new(ProblemCode::NotFound, message)],
        suggestion: None,
        defaulted_year: None,
    }
}

fn suggest_after_values(
    company: Company,
    metrics: &[Metric],
    year: FiscalYear,
) -> Option<String> {
    match metrics.first()? {
        Metric::TotalRevenue => Some(format!(
            "Would you also like to know about {company}'s net income or \
             revenue growth for FY{year}?"
        )),
        Metric::NetIncome => Some(format!(
            "Perhaps {company}'s cash flow or net income growth for FY{year} next?"
        )),
        Metric::TotalAssets | Metric::TotalLiabilities => Some(format!(
            "Would you like a summary of {company}'s overall financial health \
             for FY{year}?"
        )),
        Metric::OperatingCashFlow => None,
    }
}

/// Renders a USD-millions figure with thousands separators, e.g. `$96,995M`.
fn format_usd_millions(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as i64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}M")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FinancialFact;

    fn year(value: u16) -> FiscalYear {
        FiscalYear::new(value).expect("plausible year")
    }

    #[test]
    fn formats_usd_millions_with_separators() {
        assert_eq!(format_usd_millions(96_995.0), "$96,995M");
        assert_eq!(format_usd_millions(1_234_567.0), "$1,234,567M");
        assert_eq!(format_usd_millions(512.0), "$512M");
        assert_eq!(format_usd_millions(-1_000.4), "-$1,000M");
    }

    #[test]
    fn value_reply_quotes_stored_figure() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("What is Apple's revenue for 2023?");

        assert_eq!(
            reply.text,
            "Apple's Total Revenue for FY2023 was $383,285M."
        );
        assert!(reply.problems.is_empty());
        assert!(matches!(reply.data, ReplyData::Values { ref figures, .. }
            if figures.len() == 1 && figures[0].value_usd_m == 383_285.0));
    }

    #[test]
    fn plural_metrics_use_were() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Apple total assets 2023");
        assert_eq!(reply.text, "Apple's Total Assets for FY2023 were $352,583M.");
    }

    #[test]
    fn growth_reply_formats_percentage() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Apple revenue growth for 2023");

        assert_eq!(
            reply.text,
            "Apple's Total Revenue growth for FY2023 was -2.80%."
        );
        assert!(reply.problems.is_empty());
    }

    #[test]
    fn growth_without_prior_year_is_undefined() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Tesla net income growth in 2022");

        assert_eq!(reply.problems.len(), 1);
        assert_eq!(reply.problems[0].code, ProblemCode::Undefined);
        assert!(reply.text.contains("requires the previous year's data"));
    }

    #[test]
    fn growth_on_zero_base_is_undefined_not_a_division_error() {
        let facts = [
            FinancialFact::new(Company::Tesla, Metric::NetIncome, year(2022), 0.0)
                .expect("finite"),
            FinancialFact::new(Company::Tesla, Metric::NetIncome, year(2023), 100.0)
                .expect("finite"),
        ];
        let dataset = FinancialDataset::from_facts(facts).expect("valid dataset");
        let reply = Responder::new(&dataset).answer("Tesla profit growth 2023");

        assert_eq!(reply.problems.len(), 1);
        assert_eq!(reply.problems[0].code, ProblemCode::Undefined);
        assert!(reply.text.contains("zero"));
    }

    #[test]
    fn uncovered_year_is_not_found() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Apple revenue for 2021");

        assert_eq!(reply.text, "No Total Revenue data for Apple in FY2021.");
        assert_eq!(reply.problems.len(), 1);
        assert_eq!(reply.problems[0].code, ProblemCode::NotFound);
    }

    #[test]
    fn missing_year_defaults_to_latest_with_notice() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Microsoft net income");

        assert_eq!(reply.defaulted_year, Some(year(2024)));
        assert!(reply.text.starts_with("Using Microsoft's latest covered year, FY2024."));
        assert!(reply.text.contains("$88,136M"));
    }

    #[test]
    fn summary_lists_all_metrics_and_growth() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Summarise Apple's performance for 2023");

        for metric in Metric::ALL {
            assert!(reply.text.contains(metric.label()), "missing {metric}");
        }
        assert!(reply.text.contains("Revenue Growth (YoY): -2.80%"));
        assert!(reply.text.contains("Net Income Growth (YoY): -2.81%"));
        assert!(reply.suggestion.is_some());
    }

    #[test]
    fn summary_for_first_covered_year_flags_missing_growth() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Summarise Tesla's performance for 2022");

        assert!(reply.text.contains("Growth data for FY2022 is not available"));
        assert!(reply.problems.is_empty());
    }

    #[test]
    fn unrecognized_input_yields_clarification() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("What's the weather like?");

        assert_eq!(reply.problems.len(), 1);
        assert_eq!(reply.problems[0].code, ProblemCode::NotUnderstood);
        assert!(reply.text.contains("Microsoft, Tesla, or Apple"));
    }

    #[test]
    fn value_reply_offers_follow_up() {
        let dataset = FinancialDataset::bundled();
        let reply = Responder::new(&dataset).answer("Apple revenue 2022");

        let suggestion = reply.suggestion.expect("suggestion present");
        assert!(suggestion.contains("net income or revenue growth"));
    }
}

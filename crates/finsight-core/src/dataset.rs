//! The metric store: an immutable mapping from (company, metric, fiscal
//! year) to a published figure in USD millions.
//!
//! The dataset is built once at startup — from the bundled table or from
//! a CSV export — and injected wherever answers are produced, so tests
//! can substitute their own data.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Company, DatasetError, FiscalYear, GrowthError, Metric, ValidationError};

/// One stored figure: a (company, metric, fiscal year) triple and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialFact {
    pub company: Company,
    pub metric: Metric,
    pub fiscal_year: FiscalYear,
    /// Figure in USD millions, as published.
    pub value_usd_m: f64,
}

impl FinancialFact {
    pub fn new(
        company: Company,
        metric: Metric,
        fiscal_year: FiscalYear,
        value_usd_m: f64,
    ) -> Result<Self, ValidationError> {
        if !value_usd_m.is_finite() {
            return Err(ValidationError::NonFiniteFigure {
                field: metric.as_str(),
            });
        }

        Ok(Self {
            company,
            metric,
            fiscal_year,
            value_usd_m,
        })
    }
}

/// Read-only store of financial figures.
///
/// Every covered triple maps to exactly one value; the builder rejects
/// duplicates. Iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct FinancialDataset {
    facts: BTreeMap<(Company, FiscalYear, Metric), f64>,
}

impl FinancialDataset {
    pub fn from_facts(
        facts: impl IntoIterator<Item = FinancialFact>,
    ) -> Result<Self, DatasetError> {
        let mut map = BTreeMap::new();
        for fact in facts {
            let key = (fact.company, fact.fiscal_year, fact.metric);
            if map.insert(key, fact.value_usd_m).is_some() {
                return Err(DatasetError::DuplicateFact {
                    company: fact.company,
                    metric: fact.metric,
                    year: fact.fiscal_year,
                });
            }
        }

        if map.is_empty() {
            return Err(DatasetError::Empty);
        }

        debug!(facts = map.len(), "dataset built");
        Ok(Self { facts: map })
    }

    /// The canned Microsoft/Tesla/Apple statement figures for FY2022-FY2024.
    ///
    /// Values are in USD millions, ordered per [`Metric::ALL`]: revenue,
    /// net income, assets, liabilities, operating cash flow.
    pub fn bundled() -> Self {
        const ROWS: [(Company, u16, [f64; 5]); 9] = [
            (Company::Microsoft, 2022, [198_270.0, 72_738.0, 364_840.0, 198_298.0, 89_035.0]),
            (Company::Microsoft, 2023, [211_915.0, 72_361.0, 411_976.0, 205_753.0, 87_582.0]),
            (Company::Microsoft, 2024, [245_122.0, 88_136.0, 512_163.0, 243_686.0, 118_548.0]),
            (Company::Tesla, 2022, [81_462.0, 12_556.0, 82_338.0, 36_440.0, 14_724.0]),
            (Company::Tesla, 2023, [96_773.0, 14_997.0, 106_618.0, 43_009.0, 13_256.0]),
            (Company::Tesla, 2024, [97_690.0, 7_091.0, 122_070.0, 48_390.0, 14_923.0]),
            (Company::Apple, 2022, [394_328.0, 99_803.0, 352_755.0, 302_083.0, 122_151.0]),
            (Company::Apple, 2023, [383_285.0, 96_995.0, 352_583.0, 290_437.0, 110_543.0]),
            (Company::Apple, 2024, [391_035.0, 93_736.0, 364_980.0, 308_030.0, 118_254.0]),
        ];

        let facts = ROWS.iter().flat_map(|(company, year, values)| {
            let fiscal_year = FiscalYear::new(*year).expect("bundled year is plausible");
            Metric::ALL
                .iter()
                .zip(values.iter())
                .map(move |(metric, value)| FinancialFact {
                    company: *company,
                    metric: *metric,
                    fiscal_year,
                    value_usd_m: *value,
                })
        });

        Self::from_facts(facts).expect("bundled dataset is well-formed")
    }

    /// Loads a dataset from a CSV export (one row per company and year).
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::from_csv_reader(csv::Reader::from_path(path)?)
    }

    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let mut facts = Vec::new();

        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            // Header occupies line 1.
            let line = index + 2;

            let company: Company = row.company.parse()?;
            let fiscal_year: FiscalYear =
                row.fiscal_year
                    .parse()
                    .map_err(|_| DatasetError::MalformedFigure {
                        row: line,
                        column: "Fiscal Year",
                        value: row.fiscal_year.clone(),
                    })?;

            let columns = [
                (Metric::TotalRevenue, &row.total_revenue),
                (Metric::NetIncome, &row.net_income),
                (Metric::TotalAssets, &row.total_assets),
                (Metric::TotalLiabilities, &row.total_liabilities),
                (Metric::OperatingCashFlow, &row.operating_cash_flow),
            ];

            for (metric, raw) in columns {
                let value =
                    parse_currency_figure(raw).ok_or_else(|| DatasetError::MalformedFigure {
                        row: line,
                        column: metric.csv_column(),
                        value: raw.clone(),
                    })?;
                facts.push(FinancialFact::new(company, metric, fiscal_year, value)?);
            }
        }

        Self::from_facts(facts)
    }

    /// The exact stored figure for a triple, if covered.
    pub fn value(&self, company: Company, metric: Metric, year: FiscalYear) -> Option<f64> {
        self.facts.get(&(company, year, metric)).copied()
    }

    /// Year-over-year growth for `year` relative to the prior year, as a
    /// ratio (0.05 means +5%).
    pub fn year_over_year_growth(
        &self,
        company: Company,
        metric: Metric,
        year: FiscalYear,
    ) -> Result<f64, GrowthError> {
        let current = self
            .value(company, metric, year)
            .ok_or(GrowthError::YearNotCovered {
                company,
                metric,
                year,
            })?;

        let missing_base = GrowthError::PriorYearNotCovered {
            company,
            metric,
            year,
        };
        let Some(base_year) = year.previous() else {
            return Err(missing_base);
        };
        let base = self
            .value(company, metric, base_year)
            .ok_or(missing_base)?;

        if base == 0.0 {
            return Err(GrowthError::ZeroBase {
                company,
                metric,
                year,
                base_year,
            });
        }

        Ok((current - base) / base)
    }

    /// Companies with at least one covered figure, in declaration order.
    pub fn companies(&self) -> Vec<Company> {
        Company::ALL
            .into_iter()
            .filter(|company| self.facts.keys().any(|(c, _, _)| c == company))
            .collect()
    }

    /// Covered fiscal years for a company, ascending.
    pub fn years(&self, company: Company) -> Vec<FiscalYear> {
        let mut years: Vec<FiscalYear> = self
            .facts
            .keys()
            .filter(|(c, _, _)| *c == company)
            .map(|(_, year, _)| *year)
            .collect();
        years.dedup();
        years
    }

    /// Most recent covered fiscal year for a company.
    pub fn latest_year(&self, company: Company) -> Option<FiscalYear> {
        self.years(company).last().copied()
    }

    /// Whether any year covers this metric for the company.
    pub fn covers_metric(&self, company: Company, metric: Metric) -> bool {
        self.facts
            .keys()
            .any(|(c, _, m)| *c == company && *m == metric)
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Fiscal Year")]
    fiscal_year: String,
    #[serde(rename = "Total Revenue ($M)")]
    total_revenue: String,
    #[serde(rename = "Net Income ($M)")]
    net_income: String,
    #[serde(rename = "Total Assets ($M)")]
    total_assets: String,
    #[serde(rename = "Total Liabilities ($M)")]
    total_liabilities: String,
    #[serde(rename = "Cash Flow from Operating Activities ($M)")]
    operating_cash_flow: String,
}

/// Accepts `1,234.5`, `$1,234`, and plain numbers; exported sheets carry
/// thousands separators.
fn parse_currency_figure(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$') && !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

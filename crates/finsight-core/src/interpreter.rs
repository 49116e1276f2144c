//! Free-text query interpretation.
//!
//! Matching is deliberately shallow: case-insensitive keyword and phrase
//! lookup against the fixed company and metric vocabularies, with
//! four-digit standalone tokens treated as fiscal years. Anything
//! unrecognized fails closed with a [`ParseFailure`] instead of guessing.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{Company, FiscalYear, Metric};

const GROWTH_KEYWORDS: [&str; 4] = ["growth", "grew", "year-over-year", "year over year"];

const SUMMARY_KEYWORDS: [&str; 6] = [
    "summarise",
    "summarize",
    "summary",
    "performance",
    "overview",
    "financial health",
];

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Value,
    Growth,
    Summary,
}

/// Normalized form of a recognized question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatQuery {
    pub company: Company,
    /// Metrics named in the question, in declaration order; empty for
    /// summaries.
    pub metrics: Vec<Metric>,
    /// Fiscal year named in the question, if any.
    pub fiscal_year: Option<FiscalYear>,
    pub kind: RequestKind,
}

/// Why a question could not be mapped to a [`ChatQuery`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("no recognizable company in the question")]
    MissingCompany,

    #[error("question names more than one company")]
    AmbiguousCompany { candidates: Vec<Company> },

    #[error("no recognizable metric or summary request for {company}")]
    MissingMetric { company: Company },
}

/// Maps free text to a typed request.
pub fn interpret(input: &str) -> Result<ChatQuery, ParseFailure> {
    let text = input.to_lowercase();

    let company = match_company(&text)?;
    let fiscal_year = match_year(&text);

    let wants_summary = SUMMARY_KEYWORDS.iter().any(|keyword| text.contains(keyword));
    let wants_growth = GROWTH_KEYWORDS.iter().any(|keyword| text.contains(keyword));
    let metrics = match_metrics(&text);

    // A summary request covers all metrics, so any that were also named
    // individually are folded into it.
    let (kind, metrics) = if wants_summary {
        (RequestKind::Summary, Vec::new())
    } else if metrics.is_empty() {
        return Err(ParseFailure::MissingMetric { company });
    } else if wants_growth {
        (RequestKind::Growth, metrics)
    } else {
        (RequestKind::Value, metrics)
    };

    let query = ChatQuery {
        company,
        metrics,
        fiscal_year,
        kind,
    };
    debug!(?query, "interpreted question");
    Ok(query)
}

fn match_company(text: &str) -> Result<Company, ParseFailure> {
    let candidates: Vec<Company> = Company::ALL
        .into_iter()
        .filter(|company| company.keywords().iter().any(|keyword| text.contains(keyword)))
        .collect();

    match candidates.as_slice() {
        [] => Err(ParseFailure::MissingCompany),
        [company] => Ok(*company),
        _ => Err(ParseFailure::AmbiguousCompany { candidates }),
    }
}

fn match_metrics(text: &str) -> Vec<Metric> {
    Metric::ALL
        .into_iter()
        .filter(|metric| metric.keywords().iter().any(|keyword| text.contains(keyword)))
        .collect()
}

/// Finds the first standalone four-digit token that is a plausible year.
///
/// "2023?" matches; "something2022" does not (no token boundary).
fn match_year(text: &str) -> Option<FiscalYear> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }

        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        let bounded_left = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let bounded_right = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();

        if end - start == 4 && bounded_left && bounded_right {
            if let Ok(year) = text[start..end].parse::<FiscalYear>() {
                return Some(year);
            }
        }

        start = end;
    }

    None
}

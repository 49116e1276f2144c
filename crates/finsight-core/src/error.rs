use thiserror::Error;

use crate::{Company, FiscalYear, Metric};

/// Vocabulary and construction errors exposed by `finsight-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown company '{value}', expected one of microsoft, tesla, apple")]
    UnknownCompany { value: String },
    #[error(
        "unknown metric '{value}', expected one of total_revenue, net_income, total_assets, \
         total_liabilities, operating_cash_flow"
    )]
    UnknownMetric { value: String },
    #[error("'{value}' is not a four-digit fiscal year")]
    MalformedYear { value: String },
    #[error("fiscal year {value} is not plausible")]
    ImplausibleYear { value: u16 },

    #[error("figure for {field} must be finite")]
    NonFiniteFigure { field: &'static str },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Errors raised while building or ingesting a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("duplicate figure for {company} {metric} in FY{year}")]
    DuplicateFact {
        company: Company,
        metric: Metric,
        year: FiscalYear,
    },

    #[error("dataset contains no figures")]
    Empty,

    #[error("row {row}: column '{column}' is not numeric: '{value}'")]
    MalformedFigure {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a year-over-year growth figure cannot be computed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrowthError {
    #[error("no {metric} data for {company} in FY{year}")]
    YearNotCovered {
        company: Company,
        metric: Metric,
        year: FiscalYear,
    },

    #[error("{metric} growth for {company} in FY{year} requires the previous year's data")]
    PriorYearNotCovered {
        company: Company,
        metric: Metric,
        year: FiscalYear,
    },

    #[error("{metric} growth for {company} in FY{year} is undefined (zero base in FY{base_year})")]
    ZeroBase {
        company: Company,
        metric: Metric,
        year: FiscalYear,
        base_year: FiscalYear,
    },
}

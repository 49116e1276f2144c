use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// The five financial figures the assistant can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalRevenue,
    NetIncome,
    TotalAssets,
    TotalLiabilities,
    OperatingCashFlow,
}

impl Metric {
    pub const ALL: [Self; 5] = [
        Self::TotalRevenue,
        Self::NetIncome,
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::OperatingCashFlow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total_revenue",
            Self::NetIncome => "net_income",
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::OperatingCashFlow => "operating_cash_flow",
        }
    }

    /// Label used in reply prose, matching the published statement names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::NetIncome => "Net Income",
            Self::TotalAssets => "Total Assets",
            Self::TotalLiabilities => "Total Liabilities",
            Self::OperatingCashFlow => "Cash Flow from Operating Activities",
        }
    }

    /// Lowercase phrases that resolve to this metric in free text.
    ///
    /// "profit" and "cash flow" are accepted colloquialisms.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::TotalRevenue => &["total revenue", "revenue"],
            Self::NetIncome => &["net income", "profit"],
            Self::TotalAssets => &["total assets", "assets"],
            Self::TotalLiabilities => &["total liabilities", "liabilities"],
            Self::OperatingCashFlow => &[
                "cash flow from operating activities",
                "operating cash flow",
                "cash flow",
            ],
        }
    }

    /// Column header used by the CSV export format.
    pub const fn csv_column(self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue ($M)",
            Self::NetIncome => "Net Income ($M)",
            Self::TotalAssets => "Total Assets ($M)",
            Self::TotalLiabilities => "Total Liabilities ($M)",
            Self::OperatingCashFlow => "Cash Flow from Operating Activities ($M)",
        }
    }

    /// Grammatical number for prose ("assets were", "revenue was").
    pub const fn is_plural(self) -> bool {
        matches!(self, Self::TotalAssets | Self::TotalLiabilities)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "total_revenue" | "revenue" => Ok(Self::TotalRevenue),
            "net_income" | "profit" => Ok(Self::NetIncome),
            "total_assets" | "assets" => Ok(Self::TotalAssets),
            "total_liabilities" | "liabilities" => Ok(Self::TotalLiabilities),
            "operating_cash_flow" | "cash_flow" => Ok(Self::OperatingCashFlow),
            other => Err(ValidationError::UnknownMetric {
                value: other.to_owned(),
            }),
        }
    }
}

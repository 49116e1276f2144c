use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Companies covered by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Company {
    Microsoft,
    Tesla,
    Apple,
}

impl Company {
    pub const ALL: [Self; 3] = [Self::Microsoft, Self::Tesla, Self::Apple];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Microsoft => "microsoft",
            Self::Tesla => "tesla",
            Self::Apple => "apple",
        }
    }

    /// Name used in reply prose.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Microsoft => "Microsoft",
            Self::Tesla => "Tesla",
            Self::Apple => "Apple",
        }
    }

    /// Lowercase phrases that identify this company in free text.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Microsoft => &["microsoft", "msft"],
            Self::Tesla => &["tesla", "tsla"],
            Self::Apple => &["apple", "aapl"],
        }
    }
}

impl Display for Company {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Company {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "microsoft" | "msft" => Ok(Self::Microsoft),
            "tesla" | "tsla" => Ok(Self::Tesla),
            "apple" | "aapl" => Ok(Self::Apple),
            other => Err(ValidationError::UnknownCompany {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_company_names_and_tickers() {
        assert_eq!(Company::from_str("Microsoft").expect("must parse"), Company::Microsoft);
        assert_eq!(Company::from_str("AAPL").expect("must parse"), Company::Apple);
    }

    #[test]
    fn rejects_unknown_company() {
        let err = Company::from_str("netflix").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownCompany { .. }));
    }
}

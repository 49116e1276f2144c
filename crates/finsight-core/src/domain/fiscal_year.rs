use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A four-digit fiscal year.
///
/// Construction only checks plausibility; whether a year is actually
/// covered is a property of the dataset, not of the year itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct FiscalYear(u16);

impl FiscalYear {
    const MIN: u16 = 1900;
    const MAX: u16 = 2999;

    pub fn new(year: u16) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&year) {
            return Err(ValidationError::ImplausibleYear { value: year });
        }
        Ok(Self(year))
    }

    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// The year before this one, if still plausible.
    pub fn previous(self) -> Option<Self> {
        Self::new(self.0 - 1).ok()
    }
}

impl Display for FiscalYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for FiscalYear {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FiscalYear> for u16 {
    fn from(value: FiscalYear) -> Self {
        value.0
    }
}

impl FromStr for FiscalYear {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let year: u16 = value
            .trim()
            .parse()
            .map_err(|_| ValidationError::MalformedYear {
                value: value.to_owned(),
            })?;
        Self::new(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plausible_year() {
        let year = FiscalYear::from_str("2023").expect("must parse");
        assert_eq!(year.as_u16(), 2023);
    }

    #[test]
    fn rejects_implausible_year() {
        let err = FiscalYear::new(123).expect_err("must fail");
        assert!(matches!(err, ValidationError::ImplausibleYear { .. }));
    }

    #[test]
    fn rejects_non_numeric_year() {
        let err = FiscalYear::from_str("twenty-two").expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedYear { .. }));
    }

    #[test]
    fn previous_stops_at_lower_bound() {
        let year = FiscalYear::new(1900).expect("must construct");
        assert!(year.previous().is_none());
    }
}

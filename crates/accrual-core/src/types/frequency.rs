//! Coupon frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AccrualError, AccrualResult};

/// Coupon payment frequency.
///
/// Every frequency that splits the year into whole months is supported, so
/// every regular coupon period is a whole number of months (the time step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Payments every four months (3 per year)
    EveryFourMonths,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Payments every two months (6 per year)
    BiMonthly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Creates a frequency from a number of payments per year.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidFrequency` for anything other than 1, 2, 3, 4, 6 or 12.
    pub fn from_payments_per_year(payments_per_year: u32) -> AccrualResult<Self> {
        match payments_per_year {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            3 => Ok(Frequency::EveryFourMonths),
            4 => Ok(Frequency::Quarterly),
            6 => Ok(Frequency::BiMonthly),
            12 => Ok(Frequency::Monthly),
            _ => Err(AccrualError::InvalidFrequency { payments_per_year }),
        }
    }

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::EveryFourMonths => 3,
            Frequency::Quarterly => 4,
            Frequency::BiMonthly => 6,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl TryFrom<u32> for Frequency {
    type Error = AccrualError;

    fn try_from(payments_per_year: u32) -> Result<Self, Self::Error> {
        Self::from_payments_per_year(payments_per_year)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::EveryFourMonths => "Every Four Months",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiMonthly => "Bi-Monthly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_per_period() {
        assert_eq!(Frequency::Annual.months_per_period(), 12);
        assert_eq!(Frequency::SemiAnnual.months_per_period(), 6);
        assert_eq!(Frequency::EveryFourMonths.months_per_period(), 4);
        assert_eq!(Frequency::Quarterly.months_per_period(), 3);
        assert_eq!(Frequency::BiMonthly.months_per_period(), 2);
        assert_eq!(Frequency::Monthly.months_per_period(), 1);
    }

    #[test]
    fn test_from_payments_per_year() {
        assert_eq!(Frequency::try_from(2).unwrap(), Frequency::SemiAnnual);
        assert_eq!(
            Frequency::from_payments_per_year(12).unwrap(),
            Frequency::Monthly
        );
        assert!(matches!(
            Frequency::from_payments_per_year(5),
            Err(AccrualError::InvalidFrequency {
                payments_per_year: 5
            })
        ));
        assert!(Frequency::from_payments_per_year(0).is_err());
        assert_eq!(
            Frequency::from_payments_per_year(3).unwrap(),
            Frequency::EveryFourMonths
        );
        assert_eq!(Frequency::try_from(6).unwrap(), Frequency::BiMonthly);
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::SemiAnnual.to_string(), "Semi-Annual");
        assert_eq!(Frequency::EveryFourMonths.to_string(), "Every Four Months");
        assert_eq!(Frequency::BiMonthly.to_string(), "Bi-Monthly");
    }
}

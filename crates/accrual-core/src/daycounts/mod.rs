//! Day count conventions.
//!
//! A day count convention turns a date span into a day count and a year
//! fraction: `fraction = days / year`.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - Money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed - 365 days even in leap years
//! - [`Thirty360`]: 30/360 family base - 360-day year, no day-counting rule yet
//!
//! # Usage
//!
//! ```rust
//! use accrual_core::daycounts::DayCountConvention;
//! use accrual_core::types::Date;
//! use rust_decimal::Decimal;
//!
//! let dc = DayCountConvention::Act360;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//!
//! assert_eq!(dc.days(start, end).unwrap(), 90);
//! assert_eq!(dc.fraction(start, end).unwrap(), Decimal::new(25, 2));
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AccrualResult;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the day count between two dates.
    ///
    /// Negative when `end` precedes `start`.
    fn days(&self, start: Date, end: Date) -> AccrualResult<i64>;

    /// Returns the number of days in a year for this convention.
    fn year(&self) -> u32;

    /// Calculates the year fraction between two dates: `days / year`.
    fn fraction(&self, start: Date, end: Date) -> AccrualResult<Decimal> {
        let days = self.days(start, end)?;
        Ok(Decimal::from(days) / Decimal::from(self.year()))
    }
}

/// Enumeration of the supported day count conventions.
///
/// This is the closed set used to configure a schedule. Each arm is backed by
/// a [`DayCount`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - Money market instruments
    #[serde(rename = "ACT/360", alias = "Act360")]
    Act360,

    /// Actual/365 Fixed
    #[default]
    #[serde(rename = "ACT/365F", alias = "Act365Fixed", alias = "ACT/365")]
    Act365Fixed,

    /// 30/360 family base
    #[serde(rename = "30/360", alias = "Thirty360")]
    Thirty360,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Thirty360 => Box::new(Thirty360),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Thirty360,
        ]
    }

    /// Day count between two dates under this convention.
    pub fn days(&self, start: Date, end: Date) -> AccrualResult<i64> {
        self.to_day_count().days(start, end)
    }

    /// Days per year under this convention.
    #[must_use]
    pub fn year(&self) -> u32 {
        self.to_day_count().year()
    }

    /// Year fraction between two dates under this convention.
    pub fn fraction(&self, start: Date, end: Date) -> AccrualResult<Decimal> {
        self.to_day_count().fraction(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts market names ("ACT/360", "ACT/365F", "30/360"), enum-style
    /// names ("Act360") and common aliases ("ACTUAL/365 FIXED", "BOND").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        let normalized = normalized.trim();

        match normalized {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365FIXED" | "ACT365" => Ok(DayCountConvention::Act365Fixed),

            "30/360" | "THIRTY360" | "BOND" => Ok(DayCountConvention::Thirty360),

            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

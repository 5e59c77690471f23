//! Actual/365 Fixed day count convention.

use super::DayCount;
use crate::error::AccrualResult;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 365 days, even in a leap year.
/// Also called the English Money Market basis.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn days(&self, start: Date, end: Date) -> AccrualResult<i64> {
        Ok(end - start)
    }

    fn year(&self) -> u32 {
        365
    }
}

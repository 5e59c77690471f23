//! Actual/360 day count convention.
//!
//! Used primarily for money market instruments.

use super::DayCount;
use crate::error::AccrualResult;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 360 days.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn days(&self, start: Date, end: Date) -> AccrualResult<i64> {
        Ok(end - start)
    }

    fn year(&self) -> u32 {
        360
    }
}

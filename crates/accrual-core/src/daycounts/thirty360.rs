//! 30/360 day count family.

use super::DayCount;
use crate::error::{AccrualError, AccrualResult};
use crate::types::Date;

/// Base of the 30/360 family: a 360-day year of twelve 30-day months.
///
/// The family members (US, European, ISDA, German) differ only in how they
/// adjust the day-of-month before counting. No member rule is implemented,
/// so [`DayCount::days`] fails with `AccrualError::UnimplementedConvention`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn days(&self, _start: Date, _end: Date) -> AccrualResult<i64> {
        Err(AccrualError::unimplemented_convention(self.name()))
    }

    fn year(&self) -> u32 {
        360
    }
}

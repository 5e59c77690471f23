//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::{HolidayCalendar, HolidayWindow};
use crate::error::{AccrualError, AccrualResult};
use crate::types::Date;

/// Upper bound on the number of single-day steps one adjustment may take.
pub const MAX_ADJUSTMENT_STEPS: u32 = 31;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Move to the following business day.
    Following,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[default]
    ModifiedFollowing,

    /// Move to the following business day, unless it lands on the 15th or on
    /// the last day of a month, in which case move to the preceding business day.
    ModifiedBimonthly,
}

impl BusinessDayConvention {
    /// Adjusts a date according to this convention.
    ///
    /// Only holidays within the window of `date` are considered.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::CalendarError` if no business day is found within
    /// [`MAX_ADJUSTMENT_STEPS`] days.
    pub fn adjust(&self, date: Date, holidays: &HolidayCalendar) -> AccrualResult<Date> {
        let window = holidays.window(date);

        match self {
            BusinessDayConvention::Following => walk(date, &window, 1, MAX_ADJUSTMENT_STEPS),

            BusinessDayConvention::Preceding => walk(date, &window, -1, MAX_ADJUSTMENT_STEPS),

            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = walk(date, &window, 1, MAX_ADJUSTMENT_STEPS)?;
                if adjusted.month() != date.month() {
                    // Crossed month boundary, go preceding instead
                    walk(date, &window, -1, MAX_ADJUSTMENT_STEPS)
                } else {
                    Ok(adjusted)
                }
            }

            BusinessDayConvention::ModifiedBimonthly => {
                let adjusted = walk(date, &window, 1, MAX_ADJUSTMENT_STEPS)?;
                if adjusted.day() == 15 || adjusted.is_end_of_month() {
                    walk(date, &window, -1, MAX_ADJUSTMENT_STEPS)
                } else {
                    Ok(adjusted)
                }
            }
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::ModifiedBimonthly => "Modified Bimonthly",
        };
        write!(f, "{name}")
    }
}

/// Steps one day at a time in `direction` until a business day of the window.
fn walk(date: Date, window: &HolidayWindow<'_>, direction: i64, limit: u32) -> AccrualResult<Date> {
    let mut current = date;
    let mut steps = 0;

    while !window.is_business_day(current) {
        if steps == limit {
            return Err(AccrualError::calendar_error(format!(
                "no business day within {limit} days of {date}"
            )));
        }
        current = current.add_days(direction);
        steps += 1;
    }

    if steps > 0 {
        log::trace!("adjusted {date} to {current} in {steps} steps");
    }
    Ok(current)
}

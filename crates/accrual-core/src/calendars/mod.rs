//! Holiday calendars and business day conventions.
//!
//! This module provides:
//! - [`HolidayCalendar`]: an ordered set of holiday dates
//! - [`BusinessDayConvention`]: rules for moving a date off a non-business day
//!
//! Weekends (Saturday and Sunday) are never business days. Holidays only take
//! part in an adjustment when they fall within [`HOLIDAY_WINDOW_DAYS`] of the
//! date being adjusted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

mod conventions;

pub use conventions::{BusinessDayConvention, MAX_ADJUSTMENT_STEPS};

use crate::types::Date;

/// Half-width, in calendar days, of the holiday window around an adjusted date.
pub const HOLIDAY_WINDOW_DAYS: i64 = 10;

/// A set of holiday dates.
///
/// Serialized as a plain list of ISO dates.
///
/// # Example
///
/// ```rust
/// use accrual_core::calendars::HolidayCalendar;
/// use accrual_core::types::Date;
///
/// let christmas = Date::from_ymd(2025, 12, 25).unwrap();
/// let calendar: HolidayCalendar = [christmas].into_iter().collect();
///
/// assert!(calendar.is_holiday(christmas));
/// assert!(!calendar.is_business_day(christmas));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates an empty calendar (weekends only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday. Returns `false` if it was already present.
    pub fn add_holiday(&mut self, date: Date) -> bool {
        self.holidays.insert(date)
    }

    /// Returns true if the date is a listed holiday.
    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns true if the date is neither a weekend nor a holiday.
    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Number of listed holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no holiday is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Iterates over the holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }

    /// Returns the holidays relevant to adjusting `date`.
    #[must_use]
    pub fn window(&self, date: Date) -> HolidayWindow<'_> {
        HolidayWindow {
            calendar: self,
            start: date.add_days(-HOLIDAY_WINDOW_DAYS),
            end: date.add_days(HOLIDAY_WINDOW_DAYS),
        }
    }
}

impl FromIterator<Date> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            holidays: iter.into_iter().collect(),
        }
    }
}

impl Extend<Date> for HolidayCalendar {
    fn extend<I: IntoIterator<Item = Date>>(&mut self, iter: I) {
        self.holidays.extend(iter);
    }
}

/// The holidays of a calendar within [`HOLIDAY_WINDOW_DAYS`] of a reference date.
#[derive(Debug, Clone, Copy)]
pub struct HolidayWindow<'a> {
    calendar: &'a HolidayCalendar,
    start: Date,
    end: Date,
}

impl HolidayWindow<'_> {
    /// Returns true if the date is a holiday inside the window.
    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        date >= self.start && date <= self.end && self.calendar.is_holiday(date)
    }

    /// Returns true if the date is neither a weekend nor a holiday inside the window.
    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Iterates over the holidays inside the window.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> + '_ {
        self.calendar.holidays.range(self.start..=self.end)
    }
}

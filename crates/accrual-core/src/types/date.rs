//! Date type and calendar primitives for coupon schedules.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{AccrualError, AccrualResult};

/// A calendar date (no time of day) for schedule calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. Month and year
/// arithmetic keeps the day of month, clamped to the length of the target month.
///
/// # Example
///
/// ```rust
/// use accrual_core::types::Date;
///
/// let date = Date::from_ymd(2025, 8, 31).unwrap();
/// let rolled = date.roll(0, 6, 0).unwrap();
/// assert_eq!(rolled, Date::from_ymd(2026, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AccrualResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| AccrualError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> AccrualResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| AccrualError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the date falls in a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> AccrualResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Rolls the date by calendar units.
    ///
    /// Years and months are applied first (day of month clamped to the target
    /// month), then days.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidDate` if the result is out of range.
    pub fn roll(&self, days: i64, months: i32, years: i32) -> AccrualResult<Self> {
        Ok(self.add_months(years * 12 + months)?.add_days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last calendar day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.with_day_clamped(self.days_in_month())
    }

    /// Returns the first calendar day of the date's month.
    #[must_use]
    pub fn beginning_of_month(&self) -> Self {
        self.with_day_clamped(1)
    }

    /// Checks if the next calendar day starts a new month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.add_days(1).day() == 1
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the IMM date of the date's month.
    ///
    /// This is the third Wednesday, i.e. the Wednesday falling between the
    /// 15th and the 21st.
    #[must_use]
    pub fn imm_date(&self) -> Self {
        let fifteenth = self.with_day_clamped(15);
        let from_monday = fifteenth.weekday().num_days_from_monday();
        let offset = (Weekday::Wed.num_days_from_monday() + 7 - from_monday) % 7;
        fifteenth.add_days(i64::from(offset))
    }

    /// Moves the date onto the coupon day-of-month implied by `reference`.
    ///
    /// - `reference` at end of month: snap to this month's end.
    /// - `reference` day 1 to 28: use that day.
    /// - `reference` day 29 to 31: use that day, except in February which
    ///   snaps to its month end.
    #[must_use]
    pub fn with_coupon_day(&self, reference: Date) -> Self {
        if reference.is_end_of_month() {
            return self.end_of_month();
        }

        let day = reference.day();
        if day <= 28 || self.month() != 2 {
            self.with_day_clamped(day)
        } else {
            self.end_of_month()
        }
    }

    /// Moves the date onto `day` of its month, clamped to the month length.
    #[must_use]
    pub fn with_day_clamped(&self, day: u32) -> Self {
        let day = day.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year(), self.month(), day).map_or(*self, Date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Applies [`Date::with_coupon_day`] to every date of a sequence.
///
/// The same `reference` drives the whole sequence, so a schedule generated by
/// repeated month stepping (which drifts on short months) is put back on a
/// single coupon day.
#[must_use]
pub fn adjust_coupon_days(dates: &[Date], reference: Date) -> Vec<Date> {
    dates.iter().map(|d| d.with_coupon_day(reference)).collect()
}

/// Gregorian leap year rule.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_date_creation() {
        let date = d(2025, 6, 15);
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_add_months_clamps() {
        let result = d(2025, 1, 31).add_months(1).unwrap();
        assert_eq!(result, d(2025, 2, 28));

        let result = d(2024, 1, 31).add_months(1).unwrap();
        assert_eq!(result, d(2024, 2, 29));
    }

    #[test]
    fn test_add_months_backward_across_year() {
        assert_eq!(d(2025, 1, 15).add_months(-6).unwrap(), d(2024, 7, 15));
        assert_eq!(d(2025, 3, 31).add_months(-13).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_roll_units() {
        let date = d(2020, 1, 15);
        assert_eq!(date.roll(10, 0, 0).unwrap(), d(2020, 1, 25));
        assert_eq!(date.roll(0, 6, 0).unwrap(), d(2020, 7, 15));
        assert_eq!(date.roll(0, 0, 1).unwrap(), d(2021, 1, 15));
        assert_eq!(date.roll(-15, -1, 0).unwrap(), d(2019, 11, 30));
        assert_eq!(d(2024, 2, 29).roll(0, 0, 1).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
        assert!(d(2024, 6, 1).is_leap_year());
    }

    #[test]
    fn test_days_between() {
        let d1 = d(2025, 1, 1);
        let d2 = d(2025, 1, 31);
        assert_eq!(d1.days_between(&d2), 30);
        assert_eq!(d2 - d1, 30);
        assert_eq!(d1 - d2, -30);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Date::parse("2025-06-15").unwrap(), d(2025, 6, 15));
        assert!(Date::parse("15/06/2025").is_err());
    }

    #[test]
    fn test_month_boundaries() {
        let date = d(2024, 2, 10);
        assert_eq!(date.end_of_month(), d(2024, 2, 29));
        assert_eq!(date.beginning_of_month(), d(2024, 2, 1));
        assert_eq!(d(2025, 12, 31).end_of_month(), d(2025, 12, 31));
    }

    #[test]
    fn test_is_end_of_month() {
        assert!(d(2024, 2, 29).is_end_of_month());
        assert!(!d(2024, 2, 28).is_end_of_month());
        assert!(d(2025, 2, 28).is_end_of_month());
        assert!(d(2025, 12, 31).is_end_of_month());
        assert!(!d(2025, 12, 30).is_end_of_month());
    }

    #[test]
    fn test_imm_date() {
        // March 2025: 1st is a Saturday, third Wednesday is the 19th
        assert_eq!(d(2025, 3, 3).imm_date(), d(2025, 3, 19));
        // June 2025: 15th is a Sunday
        assert_eq!(d(2025, 6, 30).imm_date(), d(2025, 6, 18));
        // September 2021: 15th is itself a Wednesday
        assert_eq!(d(2021, 9, 1).imm_date(), d(2021, 9, 15));
        // December 2024: 15th is a Sunday
        assert_eq!(d(2024, 12, 31).imm_date(), d(2024, 12, 18));
    }

    #[test]
    fn test_with_coupon_day_end_of_month_reference() {
        let reference = d(2025, 4, 30);
        assert_eq!(d(2024, 10, 28).with_coupon_day(reference), d(2024, 10, 31));
        assert_eq!(d(2024, 2, 28).with_coupon_day(reference), d(2024, 2, 29));
    }

    #[test]
    fn test_with_coupon_day_low_day_reference() {
        let reference = d(2025, 7, 15);
        assert_eq!(d(2024, 1, 28).with_coupon_day(reference), d(2024, 1, 15));
        assert_eq!(d(2024, 2, 1).with_coupon_day(reference), d(2024, 2, 15));
    }

    #[test]
    fn test_with_coupon_day_high_day_reference() {
        // 30 July is not a month end
        let reference = d(2025, 7, 30);
        assert_eq!(d(2025, 1, 28).with_coupon_day(reference), d(2025, 1, 30));
        assert_eq!(d(2025, 2, 28).with_coupon_day(reference), d(2025, 2, 28));
        assert_eq!(d(2024, 2, 28).with_coupon_day(reference), d(2024, 2, 29));
        assert_eq!(d(2024, 8, 28).with_coupon_day(reference), d(2024, 8, 30));
    }

    #[test]
    fn test_adjust_coupon_days_sequence() {
        let dates = vec![d(2024, 2, 29), d(2024, 8, 29), d(2025, 2, 28)];
        let adjusted = adjust_coupon_days(&dates, d(2025, 8, 31));
        assert_eq!(adjusted, vec![d(2024, 2, 29), d(2024, 8, 31), d(2025, 2, 28)]);
    }

    #[test]
    fn test_with_day_clamped() {
        assert_eq!(d(2025, 4, 10).with_day_clamped(31), d(2025, 4, 30));
        assert_eq!(d(2024, 2, 10).with_day_clamped(30), d(2024, 2, 29));
        assert_eq!(d(2025, 7, 31).with_day_clamped(15), d(2025, 7, 15));
    }

    #[test]
    fn test_weekend_detection() {
        assert!(!d(2025, 1, 6).is_weekend());
        assert!(d(2025, 1, 4).is_weekend());
        assert!(d(2025, 1, 5).is_weekend());
        assert_eq!(d(2025, 1, 6).weekday(), Weekday::Mon);
    }

    #[test]
    fn test_date_arithmetic_operators() {
        let d1 = d(2025, 1, 1);
        let d2 = d1 + 10;
        assert_eq!(d2.day(), 11);
        let d3 = d2 - 5;
        assert_eq!(d3.day(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", d(2025, 6, 15)), "2025-06-15");
    }

    #[test]
    fn test_serde() {
        let date = d(2025, 6, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}

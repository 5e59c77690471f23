//! Coupon schedule generation.
//!
//! A [`Schedule`] derives the quasi-coupon grid of a bond from its settlement,
//! maturity, optional issue date and optional explicit first / last coupon
//! dates. Three anchor modes exist:
//!
//! - **First coupon**: the grid is stepped backward from the first coupon down
//!   to issue (or settlement), then forward up to maturity.
//! - **Last coupon**: the grid is stepped forward from the last coupon to the
//!   last date not after maturity, then backward down to issue (or settlement).
//! - **Regular**: the grid is stepped backward from maturity.
//!
//! Nothing is cached. Every query recomputes from the current field values.
//!
//! # Example
//!
//! ```rust
//! use accrual_bonds::cashflows::Schedule;
//! use accrual_core::types::{Date, Frequency};
//!
//! let schedule = Schedule::builder(
//!     Date::from_ymd(2020, 1, 15).unwrap(),
//!     Date::from_ymd(2025, 7, 15).unwrap(),
//! )
//! .frequency(Frequency::SemiAnnual)
//! .build()
//! .unwrap();
//!
//! let dates = schedule.coupon_dates().unwrap();
//! assert_eq!(dates.len(), 11);
//! assert_eq!(dates[0], Date::from_ymd(2020, 7, 15).unwrap());
//! ```

use rust_decimal::Decimal;

use accrual_core::calendars::{BusinessDayConvention, HolidayCalendar};
use accrual_core::daycounts::DayCountConvention;
use accrual_core::types::{Date, Frequency};
use accrual_core::AccrualError;

use crate::error::{BondError, BondResult};

/// Default number of calendar days between the ex-dividend date and the coupon.
pub const DEFAULT_EX_DIVIDEND_DAYS: u32 = 7;

/// Which date the quasi-coupon grid is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    FirstCoupon(Date),
    LastCoupon(Date),
    Maturity,
}

/// A bond coupon schedule.
///
/// Date fields obey these constraints at all times:
///
/// - settlement <= maturity
/// - issue <= settlement
/// - last coupon < maturity
/// - first coupon > issue
///
/// Setters that would break one of them fail with `BondError::InvalidSchedule`
/// and leave the schedule unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    settlement: Date,
    maturity: Date,
    issue: Option<Date>,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    frequency: Frequency,
    day_count: DayCountConvention,
    business_day_convention: BusinessDayConvention,
    holidays: HolidayCalendar,
    end_of_month: bool,
    ex_dividend_days: u32,
}

impl Schedule {
    /// Creates a regular schedule with default conventions.
    ///
    /// Defaults: semi-annual, ACT/365F, Modified Following, end-of-month on,
    /// 7 ex-dividend days, no holidays.
    pub fn new(settlement: Date, maturity: Date) -> BondResult<Self> {
        Self::builder(settlement, maturity).build()
    }

    /// Starts building a schedule.
    #[must_use]
    pub fn builder(settlement: Date, maturity: Date) -> ScheduleBuilder {
        ScheduleBuilder::new(settlement, maturity)
    }

    // ==================== Accessors ====================

    /// Returns the settlement (valuation) date.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the issue date, if known.
    #[must_use]
    pub fn issue(&self) -> Option<Date> {
        self.issue
    }

    /// Returns the explicit first coupon date, if any.
    #[must_use]
    pub fn first_coupon(&self) -> Option<Date> {
        self.first_coupon
    }

    /// Returns the explicit last coupon date, if any.
    #[must_use]
    pub fn last_coupon(&self) -> Option<Date> {
        self.last_coupon
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the business day convention.
    #[must_use]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }

    /// Returns the holiday calendar.
    #[must_use]
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the end-of-month flag.
    #[must_use]
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Returns the ex-dividend offset in calendar days.
    #[must_use]
    pub fn ex_dividend_days(&self) -> u32 {
        self.ex_dividend_days
    }

    /// Months between two regular coupon dates.
    #[must_use]
    pub fn time_step(&self) -> u32 {
        self.frequency.months_per_period()
    }

    /// Returns true if an explicit first coupon date is set.
    #[must_use]
    pub fn has_odd_first(&self) -> bool {
        self.first_coupon.is_some()
    }

    /// Returns true if an explicit last coupon date is set.
    #[must_use]
    pub fn has_odd_last(&self) -> bool {
        self.last_coupon.is_some()
    }

    // ==================== Validated setters ====================

    /// Moves the settlement date.
    pub fn set_settlement(&mut self, date: Date) -> BondResult<()> {
        self.update(|s| s.settlement = date)
    }

    /// Moves the maturity date.
    pub fn set_maturity(&mut self, date: Date) -> BondResult<()> {
        self.update(|s| s.maturity = date)
    }

    /// Sets or clears the issue date.
    pub fn set_issue(&mut self, date: Option<Date>) -> BondResult<()> {
        self.update(|s| s.issue = date)
    }

    /// Sets or clears the explicit first coupon date.
    pub fn set_first_coupon(&mut self, date: Option<Date>) -> BondResult<()> {
        self.update(|s| s.first_coupon = date)
    }

    /// Sets or clears the explicit last coupon date.
    pub fn set_last_coupon(&mut self, date: Option<Date>) -> BondResult<()> {
        self.update(|s| s.last_coupon = date)
    }

    /// Changes the coupon frequency.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    /// Changes the day count convention.
    pub fn set_day_count(&mut self, day_count: DayCountConvention) {
        self.day_count = day_count;
    }

    fn update(&mut self, apply: impl FnOnce(&mut Self)) -> BondResult<()> {
        let mut candidate = self.clone();
        apply(&mut candidate);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    fn validate(&self) -> BondResult<()> {
        if self.settlement > self.maturity {
            return Err(BondError::invalid_schedule(format!(
                "settlement {} is after maturity {}",
                self.settlement, self.maturity
            )));
        }
        if let Some(issue) = self.issue {
            if issue > self.settlement {
                return Err(BondError::invalid_schedule(format!(
                    "issue {} is after settlement {}",
                    issue, self.settlement
                )));
            }
        }
        if let Some(last_coupon) = self.last_coupon {
            if last_coupon >= self.maturity {
                return Err(BondError::invalid_schedule(format!(
                    "last coupon {} is not before maturity {}",
                    last_coupon, self.maturity
                )));
            }
        }
        if let (Some(first_coupon), Some(issue)) = (self.first_coupon, self.issue) {
            if first_coupon <= issue {
                return Err(BondError::invalid_schedule(format!(
                    "first coupon {} is not after issue {}",
                    first_coupon, issue
                )));
            }
        }
        Ok(())
    }

    // ==================== Date arithmetic ====================

    fn anchor(&self) -> Anchor {
        match (self.first_coupon, self.last_coupon) {
            (Some(first_coupon), _) => Anchor::FirstCoupon(first_coupon),
            (None, Some(last_coupon)) => Anchor::LastCoupon(last_coupon),
            (None, None) => Anchor::Maturity,
        }
    }

    /// Reference date whose day-of-month every quasi-coupon date follows.
    fn computation_date(&self) -> Date {
        self.last_coupon
            .or(self.first_coupon)
            .unwrap_or(self.maturity)
    }

    /// Issue date, or settlement when the issue date is unknown.
    fn generation_floor(&self) -> Date {
        self.issue.unwrap_or(self.settlement)
    }

    fn roll_periods(&self, date: Date, periods: i32) -> BondResult<Date> {
        Ok(date.add_months(periods * self.time_step() as i32)?)
    }

    /// Puts `date` on the coupon day-of-month implied by `reference`.
    ///
    /// With the end-of-month rule off, a month-end reference keeps its literal day.
    pub(crate) fn align(&self, date: Date, reference: Date) -> Date {
        if self.end_of_month || !reference.is_end_of_month() {
            date.with_coupon_day(reference)
        } else {
            date.with_day_clamped(reference.day())
        }
    }

    /// Rolls a coupon date by whole periods onto the quasi-coupon grid.
    pub(crate) fn step_coupon_date(&self, date: Date, periods: i32) -> BondResult<Date> {
        Ok(self.align(self.roll_periods(date, periods)?, self.computation_date()))
    }

    // ==================== Quasi-coupon dates ====================

    /// The complete quasi-coupon sequence, sorted and ending at maturity.
    pub fn full_quasi_coupon_dates(&self) -> BondResult<Vec<Date>> {
        let floor = self.generation_floor();
        let anchor = self.anchor();
        let mut dates = Vec::new();

        match anchor {
            Anchor::FirstCoupon(first_coupon) => {
                let mut date = first_coupon;
                while date > floor {
                    date = self.roll_periods(date, -1)?;
                }
                while date < self.maturity {
                    dates.push(date);
                    date = self.roll_periods(date, 1)?;
                }
            }
            Anchor::LastCoupon(last_coupon) => {
                let mut date = last_coupon;
                while date < self.maturity {
                    date = self.roll_periods(date, 1)?;
                }
                if date > self.maturity {
                    date = self.roll_periods(date, -1)?;
                }
                while date > floor {
                    dates.push(date);
                    date = self.roll_periods(date, -1)?;
                }
                dates.push(date);
            }
            Anchor::Maturity => {
                let mut date = self.maturity;
                while date > floor {
                    dates.push(date);
                    date = self.roll_periods(date, -1)?;
                }
                dates.push(date);
            }
        }

        let reference = self.computation_date();
        let mut dates: Vec<Date> = dates.into_iter().map(|d| self.align(d, reference)).collect();
        if anchor != Anchor::Maturity {
            dates.push(self.maturity);
        }
        dates.retain(|d| *d <= self.maturity);
        dates.sort();
        dates.dedup();

        log::trace!(
            "{:?} schedule: {} quasi-coupon dates from {} to {}",
            anchor,
            dates.len(),
            dates[0],
            self.maturity
        );
        Ok(dates)
    }

    /// Quasi-coupon dates on or after settlement.
    pub fn quasi_coupon_dates(&self) -> BondResult<Vec<Date>> {
        let mut dates = self.full_quasi_coupon_dates()?;
        dates.retain(|d| *d >= self.settlement);
        Ok(dates)
    }

    /// Payable coupon dates after settlement.
    ///
    /// Dates before an explicit first coupon are dropped while settlement
    /// precedes it, and dates between an explicit last coupon and maturity are
    /// folded into the final payment.
    pub fn coupon_dates(&self) -> BondResult<Vec<Date>> {
        let mut dates = self.full_quasi_coupon_dates()?;
        dates.retain(|d| *d > self.settlement);

        if let Some(first_coupon) = self.first_coupon {
            if self.settlement < first_coupon {
                let maturity = self.maturity;
                dates.retain(|d| *d >= first_coupon || *d == maturity);
            }
        }

        if let Some(last_coupon) = self.last_coupon {
            while dates.len() > 1 && dates[dates.len() - 2] > last_coupon {
                dates.remove(dates.len() - 2);
            }
        }

        Ok(dates)
    }

    /// Quasi-coupon dates around settlement: `(previous, next)`.
    ///
    /// `next` is the first quasi-coupon date strictly after settlement.
    pub fn quasi_coupon_bracket(&self) -> BondResult<(Date, Date)> {
        let dates = self.full_quasi_coupon_dates()?;
        let idx = dates
            .iter()
            .position(|d| *d > self.settlement)
            .ok_or(BondError::NoUpcomingCoupon {
                settlement: self.settlement,
                last_quasi_coupon: dates[dates.len() - 1],
            })?;

        let next = dates[idx];
        let previous = if idx == 0 {
            self.step_coupon_date(next, -1)?
        } else {
            dates[idx - 1]
        };
        Ok((previous, next))
    }

    /// Last quasi-coupon date on or before settlement.
    pub fn previous_quasi_coupon(&self) -> BondResult<Date> {
        Ok(self.quasi_coupon_bracket()?.0)
    }

    /// First quasi-coupon date after settlement.
    pub fn next_quasi_coupon(&self) -> BondResult<Date> {
        Ok(self.quasi_coupon_bracket()?.1)
    }

    /// First date of the quasi-coupon sequence.
    pub fn quasi_issue_date(&self) -> BondResult<Date> {
        Ok(self.full_quasi_coupon_dates()?[0])
    }

    /// One period after the quasi issue date.
    pub fn first_quasi_coupon_date(&self) -> BondResult<Date> {
        self.step_coupon_date(self.quasi_issue_date()?, 1)
    }

    /// Second-to-last quasi-coupon date, or maturity if it is the only one.
    pub fn last_quasi_coupon(&self) -> BondResult<Date> {
        let dates = self.full_quasi_coupon_dates()?;
        Ok(dates[dates.len().saturating_sub(2)])
    }

    /// Explicit first coupon, or the first quasi-coupon date.
    pub fn first_coupon_date(&self) -> BondResult<Date> {
        match self.first_coupon {
            Some(first_coupon) => Ok(first_coupon),
            None => self.first_quasi_coupon_date(),
        }
    }

    /// Next payable coupon date after settlement.
    pub fn next_coupon(&self) -> BondResult<Option<Date>> {
        Ok(self.coupon_dates()?.first().copied())
    }

    /// Next payable coupon rolled back one period.
    pub fn previous_coupon(&self) -> BondResult<Option<Date>> {
        self.next_coupon()?
            .map(|next| self.step_coupon_date(next, -1))
            .transpose()
    }

    /// Settlement adjusted by the business day convention.
    pub fn value_date(&self) -> BondResult<Date> {
        Ok(self
            .business_day_convention
            .adjust(self.settlement, &self.holidays)?)
    }

    /// Business-day adjusted date `ex_dividend_days` before the next coupon.
    pub fn ex_dividend_date(&self) -> BondResult<Option<Date>> {
        let Some(next) = self.next_coupon()? else {
            return Ok(None);
        };
        let date = next.add_days(-i64::from(self.ex_dividend_days));
        Ok(Some(
            self.business_day_convention.adjust(date, &self.holidays)?,
        ))
    }

    // ==================== Odd periods ====================

    /// Whole regular periods folded into a long first period.
    ///
    /// 0 without an explicit first coupon or for a short first period, 1 when
    /// the issue date is unknown.
    pub fn full_odd_first_count(&self) -> BondResult<u32> {
        let Some(first_coupon) = self.first_coupon else {
            return Ok(0);
        };
        let Some(issue) = self.issue else {
            return Ok(1);
        };
        if self.roll_periods(first_coupon, -1)? < issue {
            return Ok(0);
        }

        let mut count: u32 = 0;
        let mut date = first_coupon;
        while date > issue {
            count += 1;
            date = self.roll_periods(date, -1)?;
        }
        Ok(count.saturating_sub(1))
    }

    /// Whole regular periods between the last coupon and the final quasi-coupon
    /// date before maturity. 0 for a short last stub or without a last coupon.
    pub fn full_odd_last_count(&self) -> BondResult<u32> {
        let Some(last_coupon) = self.last_coupon else {
            return Ok(0);
        };
        let after = self
            .full_quasi_coupon_dates()?
            .into_iter()
            .filter(|d| *d > last_coupon)
            .count();
        Ok(after.saturating_sub(1) as u32)
    }

    // ==================== Year fractions ====================

    /// `days(start, end) / days(period_start, period_end)` under the day count.
    pub(crate) fn day_ratio(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
    ) -> BondResult<Decimal> {
        let days = self.day_count.days(start, end)?;
        let period = self.day_count.days(period_start, period_end)?;
        if period == 0 {
            return Err(AccrualError::math_error(format!(
                "empty coupon period {period_start} to {period_end}"
            ))
            .into());
        }
        Ok(Decimal::from(days) / Decimal::from(period))
    }

    /// Year-fraction index aligned with the coupon dates, in coupon periods.
    ///
    /// The first row is settlement with a fraction of 0. Each following
    /// non-final coupon date `i` gets `i + days(settlement, first) / days(prev, next)`.
    /// The final row counts whole periods back from maturity plus the
    /// fraction of the trailing partial period.
    pub fn dates_fraction(&self) -> BondResult<Vec<(Date, Decimal)>> {
        let (previous, next) = self.quasi_coupon_bracket()?;
        let dates = self.coupon_dates()?;
        let Some(&first) = dates.first() else {
            return Err(BondError::NoUpcomingCoupon {
                settlement: self.settlement,
                last_quasi_coupon: self.maturity,
            });
        };

        let accrued = self.day_ratio(self.settlement, first, previous, next)?;
        let final_fraction = self.final_fraction()?;
        let last = dates.len() - 1;

        let mut rows = Vec::with_capacity(dates.len() + 1);
        rows.push((self.settlement, Decimal::ZERO));
        for (i, date) in dates.into_iter().enumerate() {
            let fraction = if i == last {
                final_fraction
            } else {
                Decimal::from(i) + accrued
            };
            rows.push((date, fraction));
        }
        Ok(rows)
    }

    fn final_fraction(&self) -> BondResult<Decimal> {
        let mut date = self.maturity;
        let mut count: i64 = -1;
        while date > self.settlement {
            count += 1;
            date = self.roll_periods(date, -1)?;
        }

        let next = self.align(self.roll_periods(date, 1)?, self.maturity);
        let date = self.align(date, self.maturity);
        Ok(Decimal::from(count) + self.day_ratio(self.settlement, next, date, next)?)
    }
}

/// Builder for [`Schedule`].
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    schedule: Schedule,
}

impl ScheduleBuilder {
    /// Creates a builder with default conventions.
    #[must_use]
    pub fn new(settlement: Date, maturity: Date) -> Self {
        Self {
            schedule: Schedule {
                settlement,
                maturity,
                issue: None,
                first_coupon: None,
                last_coupon: None,
                frequency: Frequency::default(),
                day_count: DayCountConvention::default(),
                business_day_convention: BusinessDayConvention::default(),
                holidays: HolidayCalendar::new(),
                end_of_month: true,
                ex_dividend_days: DEFAULT_EX_DIVIDEND_DAYS,
            },
        }
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue(mut self, date: Date) -> Self {
        self.schedule.issue = Some(date);
        self
    }

    /// Sets the explicit first coupon date (odd first period).
    #[must_use]
    pub fn first_coupon(mut self, date: Date) -> Self {
        self.schedule.first_coupon = Some(date);
        self
    }

    /// Sets the explicit last coupon date (odd last period).
    #[must_use]
    pub fn last_coupon(mut self, date: Date) -> Self {
        self.schedule.last_coupon = Some(date);
        self
    }

    /// Sets the coupon frequency (default: semi-annual).
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.schedule.frequency = frequency;
        self
    }

    /// Sets the day count convention (default: ACT/365F).
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.schedule.day_count = day_count;
        self
    }

    /// Sets the business day convention (default: Modified Following).
    #[must_use]
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.schedule.business_day_convention = convention;
        self
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.schedule.holidays = holidays;
        self
    }

    /// Sets the end-of-month rule (default: on).
    #[must_use]
    pub fn end_of_month(mut self, eom: bool) -> Self {
        self.schedule.end_of_month = eom;
        self
    }

    /// Sets the ex-dividend offset in calendar days (default: 7).
    #[must_use]
    pub fn ex_dividend_days(mut self, days: u32) -> Self {
        self.schedule.ex_dividend_days = days;
        self
    }

    /// Validates the dates and builds the schedule.
    pub fn build(self) -> BondResult<Schedule> {
        self.schedule.validate()?;
        log::debug!(
            "schedule {} -> {} ({:?}, {})",
            self.schedule.settlement,
            self.schedule.maturity,
            self.schedule.anchor(),
            self.schedule.frequency
        );
        Ok(self.schedule)
    }
}

//! Fixed rate bond.

use rust_decimal::Decimal;

use accrual_core::calendars::{BusinessDayConvention, HolidayCalendar};
use accrual_core::daycounts::DayCountConvention;
use accrual_core::types::{Date, Frequency};

use crate::cashflows::{BondTerms, CashFlowCalculator, CashFlowRow, Schedule};
use crate::error::{BondError, BondResult};

/// A fixed rate bond owning one coupon schedule.
///
/// The settlement date on the schedule is the valuation date of every query.
///
/// # Example
///
/// ```rust
/// use accrual_bonds::instruments::FixedRateBond;
/// use accrual_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let bond = FixedRateBond::builder()
///     .identifier("ODD-FIRST")
///     .coupon_rate(dec!(0.05))
///     .settlement(Date::from_ymd(2020, 1, 15).unwrap())
///     .maturity(Date::from_ymd(2025, 7, 15).unwrap())
///     .first_coupon(Date::from_ymd(2020, 4, 15).unwrap())
///     .build()
///     .unwrap();
///
/// assert!(bond.has_ofc());
/// let flows = bond.cash_flows().unwrap();
/// assert_eq!(flows[1].date, Date::from_ymd(2020, 4, 15).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRateBond {
    identifier: String,
    coupon_rate: Decimal,
    face_value: Decimal,
    schedule: Schedule,
}

impl FixedRateBond {
    /// Creates a new builder for fixed rate bonds.
    #[must_use]
    pub fn builder() -> FixedRateBondBuilder {
        FixedRateBondBuilder::default()
    }

    /// Creates a bond from an existing schedule.
    pub fn new(
        identifier: impl Into<String>,
        coupon_rate: Decimal,
        face_value: Decimal,
        schedule: Schedule,
    ) -> BondResult<Self> {
        validate_amounts(coupon_rate, face_value)?;
        Ok(Self {
            identifier: identifier.into(),
            coupon_rate,
            face_value,
            schedule,
        })
    }

    /// Returns the bond identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Returns the coupon schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the coupon schedule for mutation through its validated setters.
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// True if the bond has an explicit (odd) first coupon.
    #[must_use]
    pub fn has_ofc(&self) -> bool {
        self.schedule.has_odd_first()
    }

    /// True if the bond has an explicit (odd) last coupon.
    #[must_use]
    pub fn has_olc(&self) -> bool {
        self.schedule.has_odd_last()
    }

    /// True if the coupon rate is zero.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate.is_zero()
    }

    /// Coupon paid for one full regular period.
    #[must_use]
    pub fn regular_coupon_amount(&self) -> Decimal {
        self.terms().regular_coupon_amount()
    }

    /// Read-only view of the terms used for cash flow computation.
    #[must_use]
    pub fn terms(&self) -> BondTerms<'_> {
        BondTerms::new(self.coupon_rate, self.face_value, &self.schedule)
    }

    /// Cash flow table from settlement to maturity.
    pub fn cash_flows(&self) -> BondResult<Vec<CashFlowRow>> {
        CashFlowCalculator::new(self.terms()).amounts()
    }

    /// Payable coupon dates after settlement.
    pub fn coupon_dates(&self) -> BondResult<Vec<Date>> {
        self.schedule.coupon_dates()
    }

    /// Interest accrued at settlement.
    pub fn accrued_interest(&self) -> BondResult<Decimal> {
        CashFlowCalculator::new(self.terms()).accrued_interest()
    }
}

impl std::fmt::Display for FixedRateBond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}% {}",
            self.identifier,
            self.coupon_rate * Decimal::ONE_HUNDRED,
            self.schedule.maturity()
        )
    }
}

fn validate_amounts(coupon_rate: Decimal, face_value: Decimal) -> BondResult<()> {
    if coupon_rate < Decimal::ZERO {
        return Err(BondError::invalid_spec(format!(
            "coupon rate {coupon_rate} is negative"
        )));
    }
    if face_value <= Decimal::ZERO {
        return Err(BondError::invalid_spec(format!(
            "face value {face_value} must be positive"
        )));
    }
    Ok(())
}

/// Builder for [`FixedRateBond`].
#[derive(Debug, Clone, Default)]
pub struct FixedRateBondBuilder {
    identifier: Option<String>,
    coupon_rate: Option<Decimal>,
    face_value: Option<Decimal>,
    settlement: Option<Date>,
    maturity: Option<Date>,
    issue: Option<Date>,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    frequency: Option<Frequency>,
    day_count: Option<DayCountConvention>,
    business_day_convention: Option<BusinessDayConvention>,
    holidays: Option<HolidayCalendar>,
    end_of_month: Option<bool>,
    ex_dividend_days: Option<u32>,
}

impl FixedRateBondBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bond identifier.
    #[must_use]
    pub fn identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }

    /// Sets the coupon rate as a decimal (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the face value (default: 100).
    #[must_use]
    pub fn face_value(mut self, value: Decimal) -> Self {
        self.face_value = Some(value);
        self
    }

    /// Sets the settlement (valuation) date.
    #[must_use]
    pub fn settlement(mut self, date: Date) -> Self {
        self.settlement = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue(mut self, date: Date) -> Self {
        self.issue = Some(date);
        self
    }

    /// Sets the first coupon date (for odd first coupon).
    #[must_use]
    pub fn first_coupon(mut self, date: Date) -> Self {
        self.first_coupon = Some(date);
        self
    }

    /// Sets the last coupon date (for odd last coupon).
    #[must_use]
    pub fn last_coupon(mut self, date: Date) -> Self {
        self.last_coupon = Some(date);
        self
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = Some(dc);
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = Some(convention);
        self
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = Some(holidays);
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = Some(eom);
        self
    }

    /// Sets the ex-dividend days.
    #[must_use]
    pub fn ex_dividend_days(mut self, days: u32) -> Self {
        self.ex_dividend_days = Some(days);
        self
    }

    /// Builds the bond.
    pub fn build(self) -> BondResult<FixedRateBond> {
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;
        let settlement = self
            .settlement
            .ok_or_else(|| BondError::missing_field("settlement"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| BondError::missing_field("maturity"))?;

        let mut builder = Schedule::builder(settlement, maturity);
        if let Some(issue) = self.issue {
            builder = builder.issue(issue);
        }
        if let Some(first_coupon) = self.first_coupon {
            builder = builder.first_coupon(first_coupon);
        }
        if let Some(last_coupon) = self.last_coupon {
            builder = builder.last_coupon(last_coupon);
        }
        if let Some(frequency) = self.frequency {
            builder = builder.frequency(frequency);
        }
        if let Some(day_count) = self.day_count {
            builder = builder.day_count(day_count);
        }
        if let Some(convention) = self.business_day_convention {
            builder = builder.business_day_convention(convention);
        }
        if let Some(holidays) = self.holidays {
            builder = builder.holidays(holidays);
        }
        if let Some(eom) = self.end_of_month {
            builder = builder.end_of_month(eom);
        }
        if let Some(days) = self.ex_dividend_days {
            builder = builder.ex_dividend_days(days);
        }

        FixedRateBond::new(
            self.identifier.unwrap_or_default(),
            coupon_rate,
            self.face_value.unwrap_or(Decimal::ONE_HUNDRED),
            builder.build()?,
        )
    }
}

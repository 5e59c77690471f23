//! Coupon and accrual amounts per cash flow date.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use accrual_core::types::Date;
use accrual_core::AccrualError;

use super::Schedule;
use crate::error::BondResult;

/// One row of the cash flow table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowRow {
    /// Settlement date (first row) or coupon payment date.
    pub date: Date,
    /// Coupon amount; the final row includes redemption.
    pub amount: Decimal,
    /// Position of the date in coupon periods from settlement.
    pub year_fraction: Decimal,
}

/// Read-only view of the bond terms that drive the amounts.
#[derive(Debug, Clone, Copy)]
pub struct BondTerms<'a> {
    /// Annual coupon rate as a decimal (0.05 for 5%).
    pub coupon_rate: Decimal,
    /// Face value redeemed at maturity.
    pub face_value: Decimal,
    /// Coupon schedule.
    pub schedule: &'a Schedule,
}

impl<'a> BondTerms<'a> {
    /// Creates a view over the given terms.
    #[must_use]
    pub fn new(coupon_rate: Decimal, face_value: Decimal, schedule: &'a Schedule) -> Self {
        Self {
            coupon_rate,
            face_value,
            schedule,
        }
    }

    /// Coupon paid for one full regular period.
    #[must_use]
    pub fn regular_coupon_amount(&self) -> Decimal {
        self.face_value * self.coupon_rate
            / Decimal::from(self.schedule.frequency().periods_per_year())
    }
}

/// Computes the cash flow table of a bond.
///
/// The first row is settlement. Its amount is the part of the next coupon
/// that accrues from settlement to that coupon, and is 0 when settlement is
/// itself a coupon date. The remaining rows hold coupon amounts, with the face
/// value added to the last one.
#[derive(Debug, Clone, Copy)]
pub struct CashFlowCalculator<'a> {
    terms: BondTerms<'a>,
}

impl<'a> CashFlowCalculator<'a> {
    /// Creates a calculator over the given terms.
    #[must_use]
    pub fn new(terms: BondTerms<'a>) -> Self {
        Self { terms }
    }

    /// Returns the terms this calculator reads.
    #[must_use]
    pub fn terms(&self) -> &BondTerms<'a> {
        &self.terms
    }

    /// Builds the cash flow table.
    pub fn amounts(&self) -> BondResult<Vec<CashFlowRow>> {
        let schedule = self.terms.schedule;
        let cfa = self.terms.regular_coupon_amount();

        let mut rows: Vec<CashFlowRow> = schedule
            .dates_fraction()?
            .into_iter()
            .map(|(date, year_fraction)| CashFlowRow {
                date,
                amount: cfa,
                year_fraction,
            })
            .collect();

        match (schedule.has_odd_first(), schedule.has_odd_last()) {
            (false, false) => self.regular_amounts(&mut rows, cfa)?,
            (true, _) => self.odd_first_amounts(&mut rows, cfa)?,
            (false, true) => self.odd_last_amounts(&mut rows, cfa)?,
        }

        if let Some(last) = rows.last_mut() {
            last.amount += self.terms.face_value;
        }
        Ok(rows)
    }

    /// Interest accrued from the start of the current period to settlement.
    ///
    /// The period starts at the latest of the previous quasi-coupon date and
    /// issue, at issue before an explicit first coupon, and at the last coupon
    /// after an explicit last coupon. Before an explicit first coupon with an
    /// unknown issue date the first period counts as one regular coupon spread
    /// from the quasi issue date to the first coupon.
    pub fn accrued_interest(&self) -> BondResult<Decimal> {
        let schedule = self.terms.schedule;
        let settlement = schedule.settlement();
        let cfa = self.terms.regular_coupon_amount();

        if let Some(first_coupon) = schedule.first_coupon() {
            if settlement < first_coupon && schedule.issue().is_none() {
                let quasi_issue = schedule.quasi_issue_date()?;
                return self.fraction(cfa, quasi_issue, settlement, quasi_issue, first_coupon);
            }
        }

        let start = self.accrual_start()?;
        if start >= settlement {
            return Ok(Decimal::ZERO);
        }
        self.prorated(cfa, start, settlement)
    }

    /// `cash * days(days_start, days_end) / days(period_start, period_end)`.
    pub fn fraction(
        &self,
        cash: Decimal,
        days_start: Date,
        days_end: Date,
        period_start: Date,
        period_end: Date,
    ) -> BondResult<Decimal> {
        let day_count = self.terms.schedule.day_count();
        let days = day_count.days(days_start, days_end)?;
        let period = day_count.days(period_start, period_end)?;
        if period == 0 {
            return Err(AccrualError::math_error(format!(
                "empty coupon period {period_start} to {period_end}"
            ))
            .into());
        }
        Ok(cash * Decimal::from(days) / Decimal::from(period))
    }

    /// Applies [`fraction`](Self::fraction) over every quasi-coupon period
    /// overlapping `[start, end]` and sums the pieces.
    ///
    /// The period after the last quasi-coupon date ends one time step later,
    /// not at maturity.
    pub fn prorated(&self, cash: Decimal, start: Date, end: Date) -> BondResult<Decimal> {
        let mut total = Decimal::ZERO;
        for (period_start, period_end) in self.notional_periods(start, end)? {
            let from = start.max(period_start);
            let to = end.min(period_end);
            if from < to {
                total += self.fraction(cash, from, to, period_start, period_end)?;
            }
        }
        Ok(total)
    }

    fn notional_periods(&self, start: Date, end: Date) -> BondResult<Vec<(Date, Date)>> {
        let schedule = self.terms.schedule;
        let mut dates = schedule.full_quasi_coupon_dates()?;

        let n = dates.len();
        if n >= 2 {
            dates[n - 1] = schedule.step_coupon_date(dates[n - 2], 1)?;
        }
        while dates[0] > start {
            let earlier = schedule.step_coupon_date(dates[0], -1)?;
            dates.insert(0, earlier);
        }
        while dates[dates.len() - 1] < end {
            let later = schedule.step_coupon_date(dates[dates.len() - 1], 1)?;
            dates.push(later);
        }

        Ok(dates.windows(2).map(|w| (w[0], w[1])).collect())
    }

    fn accrual_start(&self) -> BondResult<Date> {
        let schedule = self.terms.schedule;
        let settlement = schedule.settlement();

        if let (Some(first_coupon), Some(issue)) = (schedule.first_coupon(), schedule.issue()) {
            if settlement < first_coupon {
                return Ok(issue);
            }
        }
        if let Some(last_coupon) = schedule.last_coupon() {
            if settlement > last_coupon {
                return Ok(last_coupon);
            }
        }

        let previous = schedule.previous_quasi_coupon()?;
        Ok(schedule.issue().map_or(previous, |issue| issue.max(previous)))
    }

    /// Final payment of a schedule anchored on an odd period.
    fn tail_amount(&self, cfa: Decimal) -> BondResult<Decimal> {
        let schedule = self.terms.schedule;
        let maturity = schedule.maturity();

        match schedule.last_coupon() {
            Some(last_coupon) => {
                let full_periods = schedule.full_odd_last_count()?;
                let lqc = schedule.step_coupon_date(last_coupon, full_periods as i32)?;
                let notional = schedule.step_coupon_date(lqc, 1)?;
                Ok(cfa * Decimal::from(full_periods)
                    + self.fraction(cfa, lqc, maturity, lqc, notional)?)
            }
            None => {
                let lqc = schedule.last_quasi_coupon()?;
                let notional = schedule.step_coupon_date(lqc, 1)?;
                self.fraction(cfa, lqc, maturity, lqc, notional)
            }
        }
    }

    fn regular_amounts(&self, rows: &mut [CashFlowRow], cfa: Decimal) -> BondResult<()> {
        let schedule = self.terms.schedule;
        let settlement = schedule.settlement();
        let (previous, next) = schedule.quasi_coupon_bracket()?;

        if settlement == previous {
            log::debug!("regular schedule, settlement on coupon date {settlement}");
            rows[0].amount = Decimal::ZERO;
        } else if let Some(issue) = schedule.issue().filter(|issue| *issue > previous) {
            log::debug!("regular schedule, settlement in the issue stub from {issue}");
            let coupon = self.fraction(cfa, issue, next, previous, next)?;
            rows[1].amount = coupon;
            rows[0].amount = self.fraction(coupon, settlement, next, issue, next)?;
        } else {
            log::debug!("regular schedule, settlement inside period {previous} to {next}");
            rows[0].amount = self.fraction(cfa, settlement, next, previous, next)?;
        }
        Ok(())
    }

    fn odd_first_amounts(&self, rows: &mut [CashFlowRow], cfa: Decimal) -> BondResult<()> {
        let schedule = self.terms.schedule;
        let settlement = schedule.settlement();
        let Some(first_coupon) = schedule.first_coupon() else {
            return Ok(());
        };

        let last = rows.len() - 1;
        rows[last].amount = self.tail_amount(cfa)?;

        if settlement < first_coupon {
            match schedule.issue() {
                Some(issue) => {
                    log::debug!("odd first coupon, settlement before first coupon, issue {issue}");
                    rows[1].amount = self.prorated(cfa, issue, first_coupon)?;
                    rows[0].amount = self.prorated(cfa, settlement, first_coupon)?;
                }
                None => {
                    // Without an issue date the first period pays one regular coupon.
                    let quasi_issue = schedule.quasi_issue_date()?;
                    log::debug!(
                        "odd first coupon, settlement before first coupon, quasi issue {quasi_issue}"
                    );
                    rows[0].amount =
                        self.fraction(cfa, settlement, first_coupon, quasi_issue, first_coupon)?;
                }
            }
        } else if schedule
            .last_coupon()
            .is_some_and(|last_coupon| settlement > last_coupon)
        {
            log::debug!("odd first coupon, settlement after last coupon");
            rows[0].amount = self.prorated(cfa, settlement, schedule.maturity())?;
        } else {
            let (previous, next) = schedule.quasi_coupon_bracket()?;
            log::debug!("odd first coupon, settlement after first coupon");
            rows[0].amount = if settlement == previous {
                Decimal::ZERO
            } else {
                self.fraction(cfa, settlement, next, previous, next)?
            };
        }
        Ok(())
    }

    fn odd_last_amounts(&self, rows: &mut [CashFlowRow], cfa: Decimal) -> BondResult<()> {
        let schedule = self.terms.schedule;
        let settlement = schedule.settlement();
        let Some(last_coupon) = schedule.last_coupon() else {
            return Ok(());
        };

        let last = rows.len() - 1;
        rows[last].amount = self.tail_amount(cfa)?;

        if settlement > last_coupon {
            log::debug!("odd last coupon, settlement after last coupon {last_coupon}");
            rows[0].amount = self.prorated(cfa, settlement, schedule.maturity())?;
            return Ok(());
        }

        let (previous, next) = schedule.quasi_coupon_bracket()?;
        if settlement == previous {
            log::debug!("odd last coupon, settlement on coupon date {settlement}");
            rows[0].amount = Decimal::ZERO;
        } else if let Some(issue) = schedule.issue().filter(|issue| *issue > previous) {
            log::debug!("odd last coupon, settlement in the issue stub from {issue}");
            let coupon = self.fraction(cfa, issue, next, previous, next)?;
            rows[1].amount = coupon;
            rows[0].amount = self.fraction(coupon, settlement, next, issue, next)?;
        } else {
            log::debug!("odd last coupon, settlement inside period {previous} to {next}");
            rows[0].amount = self.fraction(cfa, settlement, next, previous, next)?;
        }
        Ok(())
    }
}

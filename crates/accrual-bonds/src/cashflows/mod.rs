//! Coupon schedules and cash flow amounts.
//!
//! - [`Schedule`]: quasi-coupon grid, coupon dates and year fraction table
//! - [`CashFlowCalculator`]: coupon, accrual and redemption amounts over a
//!   read-only [`BondTerms`] view

mod amounts;
mod schedule;

pub use amounts::{BondTerms, CashFlowCalculator, CashFlowRow};
pub use schedule::{Schedule, ScheduleBuilder, DEFAULT_EX_DIVIDEND_DAYS};

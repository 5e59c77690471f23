//! Domain types for schedule calculations.
//!
//! - [`Date`]: Calendar date with roll / month-end / IMM primitives
//! - [`Frequency`]: Coupon payment frequency

mod date;
mod frequency;

pub use date::{adjust_coupon_days, is_leap_year, Date};
pub use frequency::Frequency;

//! # Accrual Core
//!
//! Dates, calendars and conventions for the Accrual bond schedule engine.
//!
//! This crate provides the building blocks the schedule generator relies on:
//!
//! - **Types**: [`Date`] with calendar primitives (roll, end of month, IMM date,
//!   coupon-day adjustment) and coupon [`Frequency`]
//! - **Day Count Conventions**: day and year fraction calculators
//! - **Business Day Conventions**: date adjustment against a holiday calendar
//!
//! ## Example
//!
//! ```rust
//! use accrual_core::prelude::*;
//!
//! let saturday = Date::from_ymd(2025, 5, 31).unwrap();
//! let holidays = HolidayCalendar::new();
//!
//! // Following would cross into June, so Modified Following goes back to Friday.
//! let adjusted = BusinessDayConvention::ModifiedFollowing
//!     .adjust(saturday, &holidays)
//!     .unwrap();
//! assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, HolidayCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{AccrualError, AccrualResult};
    pub use crate::types::{adjust_coupon_days, is_leap_year, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{AccrualError, AccrualResult};
pub use types::{Date, Frequency};

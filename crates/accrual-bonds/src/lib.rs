//! # Accrual Bonds
//!
//! Coupon schedules and cash flow amounts for fixed rate bonds.
//!
//! This crate provides:
//!
//! - **Schedule**: quasi-coupon date generation with odd first and odd last
//!   periods, coupon date filtering and year fraction tables
//! - **Cash Flows**: per-period coupon amounts, settlement accrual and redemption
//! - **Instruments**: [`FixedRateBond`] owning one schedule
//! - **Configuration**: TOML / JSON bond descriptions
//!
//! ## Example
//!
//! ```rust
//! use accrual_bonds::prelude::*;
//! use accrual_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let bond = FixedRateBond::builder()
//!     .identifier("REGULAR-2025")
//!     .coupon_rate(dec!(0.05))
//!     .settlement(Date::from_ymd(2020, 1, 15).unwrap())
//!     .maturity(Date::from_ymd(2025, 7, 15).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let flows = bond.cash_flows().unwrap();
//! assert_eq!(flows.len(), 12);
//! assert_eq!(flows.last().unwrap().amount, dec!(102.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod cashflows;
pub mod config;
pub mod error;
pub mod instruments;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cash flows
    pub use crate::cashflows::{
        BondTerms, CashFlowCalculator, CashFlowRow, Schedule, ScheduleBuilder,
    };

    // Configuration
    pub use crate::config::{BondConfig, ValidationError};

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Instruments
    pub use crate::instruments::{FixedRateBond, FixedRateBondBuilder};
}

pub use error::{BondError, BondResult};
pub use instruments::{FixedRateBond, FixedRateBondBuilder};

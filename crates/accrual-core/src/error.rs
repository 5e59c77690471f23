//! Error types for the Accrual core crate.
//!
//! Every failure in date arithmetic, calendar adjustment and day counting is
//! reported through [`AccrualError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type AccrualResult<T> = Result<T, AccrualError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A day count convention without a concrete day-counting rule was invoked.
    #[error("Day count convention {convention} has no day-counting rule")]
    UnimplementedConvention {
        /// Market name of the convention.
        convention: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },

    /// Coupon frequency that does not divide the year into whole months.
    #[error("Invalid coupon frequency: {payments_per_year} payments per year")]
    InvalidFrequency {
        /// Requested number of payments per year.
        payments_per_year: u32,
    },

    /// Mathematical error (division by zero, overflow, etc.).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

impl AccrualError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unimplemented convention error.
    #[must_use]
    pub fn unimplemented_convention(convention: impl Into<String>) -> Self {
        Self::UnimplementedConvention {
            convention: convention.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }
}

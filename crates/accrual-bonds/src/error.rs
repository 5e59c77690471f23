//! Error types for bond operations.

use thiserror::Error;

use accrual_core::types::Date;
use accrual_core::AccrualError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondError {
    /// Schedule dates violate an ordering constraint.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Which constraint was violated.
        reason: String,
    },

    /// Settlement is at or past the final quasi-coupon date.
    #[error("No coupon after settlement {settlement} (last quasi-coupon date {last_quasi_coupon})")]
    NoUpcomingCoupon {
        /// Settlement date of the schedule.
        settlement: Date,
        /// Final date of the quasi-coupon sequence.
        last_quasi_coupon: Date,
    },

    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Bond configuration could not be read or failed validation.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the failure.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] AccrualError),
}

impl BondError {
    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_converts() {
        let err: BondError = AccrualError::unimplemented_convention("30/360").into();
        assert!(matches!(err, BondError::Core(AccrualError::UnimplementedConvention { .. })));
        assert!(err.to_string().starts_with("Core error"));
    }

    #[test]
    fn test_no_upcoming_coupon_display() {
        let err = BondError::NoUpcomingCoupon {
            settlement: Date::from_ymd(2025, 7, 15).unwrap(),
            last_quasi_coupon: Date::from_ymd(2025, 7, 15).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "No coupon after settlement 2025-07-15 (last quasi-coupon date 2025-07-15)"
        );
    }
}

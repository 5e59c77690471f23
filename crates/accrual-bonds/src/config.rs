//! Bond configuration.
//!
//! A [`BondConfig`] describes a fixed rate bond and its schedule in TOML or
//! JSON. Omitted conventions fall back to their defaults.
//!
//! ```toml
//! identifier = "XS0000000001"
//! settlement = "2020-01-15"
//! maturity = "2025-07-15"
//! first_coupon = "2020-04-15"
//! coupon_rate = 0.05
//! day_count = "ACT/360"
//! holidays = ["2020-12-25"]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use accrual_core::calendars::{BusinessDayConvention, HolidayCalendar};
use accrual_core::daycounts::DayCountConvention;
use accrual_core::types::{Date, Frequency};

use crate::cashflows::DEFAULT_EX_DIVIDEND_DAYS;
use crate::error::{BondError, BondResult};
use crate::instruments::FixedRateBond;

// =============================================================================
// VALIDATION
// =============================================================================

/// A single field-level configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// =============================================================================
// BOND CONFIGURATION
// =============================================================================

/// Serializable description of a fixed rate bond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondConfig {
    /// Bond identifier.
    #[serde(default)]
    pub identifier: String,

    /// Settlement (valuation) date.
    pub settlement: Date,

    /// Maturity date.
    pub maturity: Date,

    /// Issue date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Date>,

    /// Explicit first coupon date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_coupon: Option<Date>,

    /// Explicit last coupon date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_coupon: Option<Date>,

    /// Annual coupon rate as a decimal (0.05 for 5%).
    pub coupon_rate: Decimal,

    /// Face value.
    #[serde(default = "default_face_value")]
    pub face_value: Decimal,

    /// Coupon frequency.
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,

    /// Day count convention.
    #[serde(default = "default_day_count")]
    pub day_count: DayCountConvention,

    /// Business day convention.
    #[serde(default = "default_business_day_convention")]
    pub business_day_convention: BusinessDayConvention,

    /// Whether month-end coupon dates stay on month ends.
    #[serde(default = "default_eom")]
    pub end_of_month: bool,

    /// Ex-dividend days before coupon date.
    #[serde(default = "default_ex_dividend_days")]
    pub ex_dividend_days: u32,

    /// Holidays used for business day adjustment.
    #[serde(default)]
    pub holidays: HolidayCalendar,
}

fn default_face_value() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_frequency() -> Frequency {
    Frequency::SemiAnnual
}

fn default_day_count() -> DayCountConvention {
    DayCountConvention::Act365Fixed
}

fn default_business_day_convention() -> BusinessDayConvention {
    BusinessDayConvention::ModifiedFollowing
}

fn default_eom() -> bool {
    true
}

fn default_ex_dividend_days() -> u32 {
    DEFAULT_EX_DIVIDEND_DAYS
}

impl BondConfig {
    /// Creates a configuration with default conventions.
    #[must_use]
    pub fn new(settlement: Date, maturity: Date, coupon_rate: Decimal) -> Self {
        Self {
            identifier: String::new(),
            settlement,
            maturity,
            issue: None,
            first_coupon: None,
            last_coupon: None,
            coupon_rate,
            face_value: default_face_value(),
            frequency: default_frequency(),
            day_count: default_day_count(),
            business_day_convention: default_business_day_convention(),
            end_of_month: default_eom(),
            ex_dividend_days: default_ex_dividend_days(),
            holidays: HolidayCalendar::new(),
        }
    }

    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> BondResult<Self> {
        toml::from_str(s).map_err(|e| BondError::config(format!("invalid TOML: {e}")))
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(s: &str) -> BondResult<Self> {
        serde_json::from_str(s).map_err(|e| BondError::config(format!("invalid JSON: {e}")))
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> BondResult<String> {
        toml::to_string(self).map_err(|e| BondError::config(format!("cannot write TOML: {e}")))
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> BondResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BondError::config(format!("cannot write JSON: {e}")))
    }

    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.settlement > self.maturity {
            errors.push(ValidationError::new(
                "settlement",
                format!("{} is after maturity {}", self.settlement, self.maturity),
            ));
        }

        if let Some(issue) = self.issue {
            if issue > self.settlement {
                errors.push(ValidationError::new(
                    "issue",
                    format!("{issue} is after settlement {}", self.settlement),
                ));
            }
            if let Some(first_coupon) = self.first_coupon {
                if first_coupon <= issue {
                    errors.push(ValidationError::new(
                        "first_coupon",
                        format!("{first_coupon} is not after issue {issue}"),
                    ));
                }
            }
        }

        if let Some(last_coupon) = self.last_coupon {
            if last_coupon >= self.maturity {
                errors.push(ValidationError::new(
                    "last_coupon",
                    format!("{last_coupon} is not before maturity {}", self.maturity),
                ));
            }
        }

        if self.coupon_rate < Decimal::ZERO {
            errors.push(ValidationError::new(
                "coupon_rate",
                "Coupon rate cannot be negative",
            ));
        }

        if self.face_value <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "face_value",
                "Face value must be positive",
            ));
        }

        errors
    }

    /// Returns true if the configuration is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates the configuration and builds the bond.
    pub fn build(&self) -> BondResult<FixedRateBond> {
        let errors = self.validate();
        if !errors.is_empty() {
            let reason = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(BondError::config(reason));
        }

        let mut builder = FixedRateBond::builder()
            .identifier(self.identifier.clone())
            .coupon_rate(self.coupon_rate)
            .face_value(self.face_value)
            .settlement(self.settlement)
            .maturity(self.maturity)
            .frequency(self.frequency)
            .day_count(self.day_count)
            .business_day_convention(self.business_day_convention)
            .holidays(self.holidays.clone())
            .end_of_month(self.end_of_month)
            .ex_dividend_days(self.ex_dividend_days);

        if let Some(issue) = self.issue {
            builder = builder.issue(issue);
        }
        if let Some(first_coupon) = self.first_coupon {
            builder = builder.first_coupon(first_coupon);
        }
        if let Some(last_coupon) = self.last_coupon {
            builder = builder.last_coupon(last_coupon);
        }

        builder.build()
    }
}

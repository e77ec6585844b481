//! Configuration types for payroll.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the payroll YAML file.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{OvertimeMode, OvertimeRules, PeriodCalendar};
use crate::error::{PayrollError, PayrollResult};

/// Largest accepted overtime threshold: the hours in a leap year.
pub const MAX_THRESHOLD_HOURS: Decimal = Decimal::from_parts(8784, 0, 0, false, 0);

/// The complete payroll configuration.
///
/// `PayrollConfig::default()` matches the shipped `config/payroll.yaml`:
/// 14-day periods anchored on Monday 2024-01-01, and time and a half after
/// 40 hours per work week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Pay period calendar settings.
    #[serde(default)]
    pub pay_period: PeriodCalendar,
    /// Overtime settings.
    #[serde(default)]
    pub overtime: OvertimeRules,
}

impl PayrollConfig {
    /// Rejects settings the calculator cannot work with.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.pay_period.length_days == 0 {
            return Err(PayrollError::InvalidConfig {
                message: "pay_period.length_days must be at least 1".to_string(),
            });
        }
        if self.overtime.threshold_hours < Decimal::ZERO {
            return Err(PayrollError::InvalidConfig {
                message: "overtime.threshold_hours must not be negative".to_string(),
            });
        }
        if self.overtime.threshold_hours > MAX_THRESHOLD_HOURS {
            return Err(PayrollError::InvalidConfig {
                message: format!(
                    "overtime.threshold_hours must not exceed {}",
                    MAX_THRESHOLD_HOURS
                ),
            });
        }
        if self.overtime.multiplier < Decimal::ONE {
            return Err(PayrollError::InvalidConfig {
                message: "overtime.multiplier must be at least 1".to_string(),
            });
        }
        if self.overtime.mode == OvertimeMode::Weekly {
            // Periods must be made of whole work weeks.
            if self.pay_period.anchor_date.weekday() != self.overtime.week_start {
                return Err(PayrollError::InvalidConfig {
                    message: format!(
                        "pay_period.anchor_date {} must fall on overtime.week_start ({})",
                        self.pay_period.anchor_date, self.overtime.week_start
                    ),
                });
            }
            if self.pay_period.length_days % 7 != 0 {
                return Err(PayrollError::InvalidConfig {
                    message: "pay_period.length_days must be a multiple of 7 for weekly overtime"
                        .to_string(),
                });
            }
        }
        Ok(())
    }
}

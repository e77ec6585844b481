//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::{OvertimeRules, PeriodCalendar};
use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Loads and provides access to payroll configuration.
///
/// # File format
///
/// ```text
/// pay_period:
///   anchor_date: 2024-01-01
///   length_days: 14
/// overtime:
///   threshold_hours: "40"
///   multiplier: "1.5"
///   mode: weekly
///   week_start: Mon
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Periods are {} days", loader.calendar().length_days);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (e.g. a zero-day period)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded payroll configuration");
        Ok(loader)
    }

    /// Parses configuration from a YAML string.
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("pay_period:\n  length_days: 7\n")?;
    /// assert_eq!(loader.calendar().length_days, 7);
    /// # Ok::<(), payroll_engine::error::PayrollError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> PayrollResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> PayrollResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn parse(content: &str, path: &str) -> PayrollResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the pay period calendar.
    pub fn calendar(&self) -> &PeriodCalendar {
        &self.config.pay_period
    }

    /// Returns the overtime rules.
    pub fn overtime_rules(&self) -> &OvertimeRules {
        &self.config.overtime
    }
}

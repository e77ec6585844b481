//! Configuration loading and management for the payroll engine.
//!
//! This module loads the pay period calendar and overtime rules from a YAML
//! file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Overtime after {} hours", config.overtime_rules().threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::PayrollConfig;

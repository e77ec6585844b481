//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while calculating, storing or
//! advancing pay stubs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::PayStubStatus;

/// Broad category of a [`PayrollError`].
///
/// Callers use the kind to decide how to surface an error: validation errors
/// point at bad input data, lifecycle errors at misuse of a stub or entry
/// that is already locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input data was rejected.
    Validation,
    /// A status transition or mutation was not allowed in the current state.
    Lifecycle,
    /// A uniqueness constraint was violated.
    Conflict,
    /// A referenced record does not exist.
    NotFound,
    /// Configuration could not be loaded or was invalid.
    Config,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{ErrorKind, PayrollError};
///
/// let error = PayrollError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contained an unusable value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// An employee's hourly rate was negative.
    #[error("Employee '{employee_id}' has a negative hourly rate: {rate}")]
    NegativeRate {
        /// The employee with the bad rate.
        employee_id: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// A time entry handed to the calculator lies outside the pay period.
    #[error("Time entry '{entry_id}' dated {date} is outside the pay period {start} to {end}")]
    EntryOutsidePeriod {
        /// The offending entry.
        entry_id: String,
        /// The entry date.
        date: NaiveDate,
        /// Period start (inclusive).
        start: NaiveDate,
        /// Period end (inclusive).
        end: NaiveDate,
    },

    /// A time entry without a clock-out was handed to the calculator.
    #[error("Time entry '{entry_id}' has no clock-out time")]
    IncompleteEntry {
        /// The incomplete entry.
        entry_id: String,
    },

    /// A time entry belonging to another employee was handed to the calculator.
    #[error("Time entry '{entry_id}' belongs to '{entry_employee_id}', not '{employee_id}'")]
    EntryEmployeeMismatch {
        /// The offending entry.
        entry_id: String,
        /// The employee the entry belongs to.
        entry_employee_id: String,
        /// The employee being calculated.
        employee_id: String,
    },

    /// A pay period whose start is after its end.
    #[error("Invalid pay period: start {start} is after end {end}")]
    InvalidPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// The period would split a work week between two pay stubs.
    #[error("Pay period {start} to {end} does not cover whole work weeks starting on {week_start}")]
    PeriodSplitsWorkWeek {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
        /// The configured first day of the work week.
        week_start: chrono::Weekday,
    },

    /// A pay amount does not fit in a decimal.
    #[error("Pay amounts for '{employee_id}' are too large to calculate")]
    AmountOverflow {
        /// The employee whose amounts overflowed.
        employee_id: String,
    },

    /// A time entry record was malformed.
    #[error("Invalid time entry '{entry_id}': {message}")]
    InvalidTimeEntry {
        /// The invalid entry.
        entry_id: String,
        /// Why the entry was rejected.
        message: String,
    },

    /// A pay stub status change that is not a single forward step.
    #[error("Pay stub {stub_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// The stub being updated.
        stub_id: Uuid,
        /// Current status.
        from: PayStubStatus,
        /// Requested status.
        to: PayStubStatus,
    },

    /// A stub was marked paid without a pay date.
    #[error("Pay stub {stub_id} cannot be marked paid without a pay date")]
    MissingPayDate {
        /// The stub being updated.
        stub_id: Uuid,
    },

    /// A stub can no longer be changed in the requested way.
    #[error("Pay stub {stub_id} is {status} and can no longer be changed")]
    StubLocked {
        /// The locked stub.
        stub_id: Uuid,
        /// Its current status.
        status: PayStubStatus,
    },

    /// A time entry is covered by a finalized stub and can no longer be amended.
    #[error("Time entry '{entry_id}' is covered by finalized pay stub {stub_id}")]
    EntryLocked {
        /// The locked entry.
        entry_id: String,
        /// The stub that locks it.
        stub_id: Uuid,
    },

    /// A stub already exists for the employee and period.
    #[error("A pay stub already exists for '{employee_id}' for {start} to {end}")]
    DuplicatePayStub {
        /// The employee.
        employee_id: String,
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// A record with the same id already exists.
    #[error("{record} '{id}' already exists")]
    DuplicateRecord {
        /// The record type (e.g. "Employee").
        record: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// The employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: String,
    },

    /// The time entry does not exist.
    #[error("Time entry not found: {entry_id}")]
    TimeEntryNotFound {
        /// The missing entry id.
        entry_id: String,
    },

    /// The pay stub does not exist.
    #[error("Pay stub not found: {stub_id}")]
    PayStubNotFound {
        /// The missing stub id.
        stub_id: Uuid,
    },

    /// No generated pay period contains the date.
    #[error("No pay period contains {date}")]
    PeriodNotFound {
        /// The date that was looked up.
        date: NaiveDate,
    },
}

impl PayrollError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::InvalidConfig { .. } => ErrorKind::Config,
            PayrollError::NegativeRate { .. }
            | PayrollError::EntryOutsidePeriod { .. }
            | PayrollError::IncompleteEntry { .. }
            | PayrollError::EntryEmployeeMismatch { .. }
            | PayrollError::InvalidPeriod { .. }
            | PayrollError::PeriodSplitsWorkWeek { .. }
            | PayrollError::AmountOverflow { .. }
            | PayrollError::InvalidTimeEntry { .. } => ErrorKind::Validation,
            PayrollError::InvalidStatusTransition { .. }
            | PayrollError::MissingPayDate { .. }
            | PayrollError::StubLocked { .. }
            | PayrollError::EntryLocked { .. } => ErrorKind::Lifecycle,
            PayrollError::DuplicatePayStub { .. } | PayrollError::DuplicateRecord { .. } => {
                ErrorKind::Conflict
            }
            PayrollError::EmployeeNotFound { .. }
            | PayrollError::TimeEntryNotFound { .. }
            | PayrollError::PayStubNotFound { .. }
            | PayrollError::PeriodNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

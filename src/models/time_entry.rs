//! Time entry model and related types.
//!
//! This module defines the [`TimeEntry`] struct for representing one
//! clock-in/clock-out record of a single employee on a single day.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::seconds_to_hours;
use crate::error::{PayrollError, PayrollResult};

/// Represents a clock-in/clock-out record.
///
/// An entry is *completed* once `clock_out` is set. Only completed entries
/// are paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee who clocked in.
    pub employee_id: String,
    /// The calendar date the entry is booked against.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: NaiveDateTime,
    /// Clock-out time, absent while the employee is still on the clock.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Unpaid break minutes taken during the entry.
    #[serde(default)]
    pub break_minutes: Option<u32>,
}

impl TimeEntry {
    /// Returns true once the entry has a clock-out time.
    pub fn is_completed(&self) -> bool {
        self.clock_out.is_some()
    }

    /// Returns the paid seconds for a completed entry.
    ///
    /// Break minutes are subtracted from the clocked duration. A clock-out
    /// before the clock-in, or breaks longer than the duration, yield zero
    /// rather than a negative value.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::TimeEntry;
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let entry = TimeEntry {
    ///     id: "te_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
    ///     clock_in: NaiveDateTime::parse_from_str("2026-01-13 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     clock_out: Some(NaiveDateTime::parse_from_str("2026-01-13 15:30:00", "%Y-%m-%d %H:%M:%S").unwrap()),
    ///     break_minutes: Some(30),
    /// };
    /// assert_eq!(entry.worked_seconds(), Some(8 * 3600));
    /// ```
    pub fn worked_seconds(&self) -> Option<i64> {
        let clock_out = self.clock_out?;
        let clocked = (clock_out - self.clock_in).num_seconds();
        let breaks = i64::from(self.break_minutes.unwrap_or(0)) * 60;
        Some((clocked - breaks).max(0))
    }

    /// Returns the hours worked, rounded to two decimal places.
    ///
    /// `None` until the entry has been clocked out.
    pub fn hours_worked(&self) -> Option<Decimal> {
        self.worked_seconds().map(seconds_to_hours)
    }

    /// Checks that the record identifies an entry and an employee.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.id.trim().is_empty() {
            return Err(PayrollError::InvalidTimeEntry {
                entry_id: self.id.clone(),
                message: "id must not be empty".to_string(),
            });
        }
        if self.employee_id.trim().is_empty() {
            return Err(PayrollError::InvalidTimeEntry {
                entry_id: self.id.clone(),
                message: "employee_id must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Applies an amendment in place.
    pub fn apply(&mut self, update: TimeEntryUpdate) {
        if let Some(clock_in) = update.clock_in {
            self.clock_in = clock_in;
        }
        if let Some(clock_out) = update.clock_out {
            self.clock_out = Some(clock_out);
        }
        if let Some(break_minutes) = update.break_minutes {
            self.break_minutes = Some(break_minutes);
        }
    }
}

/// An amendment to a [`TimeEntry`]: clock-out at the end of the day, or an
/// administrative correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryUpdate {
    /// Corrected clock-in time.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out time.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Unpaid break minutes.
    #[serde(default)]
    pub break_minutes: Option<u32>,
}

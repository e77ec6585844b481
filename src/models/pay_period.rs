//! Pay period model.
//!
//! A [`PayPeriod`] is a value type produced by the period calendar. It is
//! never stored on its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Represents a pay period with an inclusive date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(period.days(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period, rejecting a start after the end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> PayrollResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Returns an error if the start date is after the end date.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.start_date > self.end_date {
            return Err(PayrollError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of days in the period, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

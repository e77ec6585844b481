//! Pay period calendar.
//!
//! Periods are a fixed number of days long and aligned to an anchor date.
//! Because alignment never restarts at a year boundary, a period that
//! straddles December 31 belongs to both years: it is the last period of one
//! year and the first period of the next. Every date therefore lies in
//! exactly one period, whichever year's sequence is consulted.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayPeriod;

/// Default period length in days (bi-weekly).
pub const DEFAULT_PERIOD_LENGTH_DAYS: u32 = 14;

fn default_anchor_date() -> NaiveDate {
    // 2024-01-01 is a Monday.
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn default_length_days() -> u32 {
    DEFAULT_PERIOD_LENGTH_DAYS
}

/// Generates fixed-length pay periods aligned to an anchor date.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PeriodCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = PeriodCalendar::default();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
/// let period = calendar.current_period(today).unwrap();
///
/// assert!(period.contains_date(today));
/// assert_eq!(period.days(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCalendar {
    /// The first day of some period. All periods are aligned to it.
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,
    /// Length of every period in days.
    #[serde(default = "default_length_days")]
    pub length_days: u32,
}

impl Default for PeriodCalendar {
    fn default() -> Self {
        Self {
            anchor_date: default_anchor_date(),
            length_days: DEFAULT_PERIOD_LENGTH_DAYS,
        }
    }
}

impl PeriodCalendar {
    /// Returns the period containing `date`.
    ///
    /// Works for dates before the anchor as well as after it. Fails only for
    /// a zero-length calendar or dates at the edge of the representable range.
    pub fn period_containing(&self, date: NaiveDate) -> PayrollResult<PayPeriod> {
        let not_found = || PayrollError::PeriodNotFound { date };
        if self.length_days == 0 {
            return Err(not_found());
        }

        let length = i64::from(self.length_days);
        let offset = (date - self.anchor_date).num_days();
        let index = offset.div_euclid(length);

        let start = TimeDelta::try_days(index * length)
            .and_then(|delta| self.anchor_date.checked_add_signed(delta))
            .ok_or_else(not_found)?;
        let end = TimeDelta::try_days(length - 1)
            .and_then(|delta| start.checked_add_signed(delta))
            .ok_or_else(not_found)?;

        Ok(PayPeriod {
            start_date: start,
            end_date: end,
        })
    }

    /// Returns every period that overlaps `year`, in order.
    ///
    /// The first period may start in the previous year and the last may end
    /// in the next one. The result depends only on the calendar and `year`.
    pub fn generate_periods(&self, year: i32) -> Vec<PayPeriod> {
        let (Some(first_day), Some(last_day)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return Vec::new();
        };

        let mut periods = Vec::new();
        let mut cursor = first_day;
        while cursor <= last_day {
            let Ok(period) = self.period_containing(cursor) else {
                break;
            };
            periods.push(period);
            match period.end_date.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }
        periods
    }

    /// Returns the period containing `today`, looked up in the sequence for
    /// `today`'s year.
    pub fn current_period(&self, today: NaiveDate) -> PayrollResult<PayPeriod> {
        self.generate_periods(today.year())
            .into_iter()
            .find(|period| period.contains_date(today))
            .ok_or(PayrollError::PeriodNotFound { date: today })
    }
}

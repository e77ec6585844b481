//! Overtime detection.
//!
//! Hours above the threshold (40 by default) are overtime. The threshold is
//! applied either per work week or once over the whole pay period,
//! depending on [`OvertimeMode`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::worked_hours::{SECONDS_PER_HOUR, round_hours};
use crate::error::{PayrollError, PayrollResult};
use crate::models::PayPeriod;

/// Default overtime threshold in hours.
pub const DEFAULT_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Default overtime multiplier (time and a half).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// How the overtime threshold is applied to a pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeMode {
    /// Threshold applies to each work week separately.
    #[default]
    Weekly,
    /// Threshold applies once to the whole period.
    PayPeriod,
}

fn default_threshold() -> Decimal {
    DEFAULT_OVERTIME_THRESHOLD
}

fn default_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

/// Overtime settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRules {
    /// Hours per bucket paid at the ordinary rate.
    #[serde(default = "default_threshold")]
    pub threshold_hours: Decimal,
    /// Rate multiplier for overtime hours.
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
    /// Whether the threshold is weekly or period-wide.
    #[serde(default)]
    pub mode: OvertimeMode,
    /// First day of a work week.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

impl Default for OvertimeRules {
    fn default() -> Self {
        Self {
            threshold_hours: DEFAULT_OVERTIME_THRESHOLD,
            multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            mode: OvertimeMode::Weekly,
            week_start: Weekday::Mon,
        }
    }
}

impl OvertimeRules {
    /// Period-wide rules with the default threshold and multiplier.
    pub fn pay_period() -> Self {
        Self {
            mode: OvertimeMode::PayPeriod,
            ..Self::default()
        }
    }

    /// Rejects a period that would split a work week between two stubs.
    ///
    /// In weekly mode the period must start on `week_start` and cover whole
    /// weeks, otherwise a week's hours are thresholded separately in each
    /// stub. Period-wide rules accept any valid period.
    pub fn check_period(&self, period: &PayPeriod) -> PayrollResult<()> {
        if self.mode == OvertimeMode::PayPeriod {
            return Ok(());
        }
        if period.start_date.weekday() != self.week_start || period.days() % 7 != 0 {
            return Err(PayrollError::PeriodSplitsWorkWeek {
                start: period.start_date,
                end: period.end_date,
                week_start: self.week_start,
            });
        }
        Ok(())
    }
}

/// The split of worked time into regular and overtime hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplit {
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours above the threshold.
    pub overtime_hours: Decimal,
}

impl OvertimeSplit {
    /// Returns regular plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// Splits a total into the part up to `threshold` and the excess.
///
/// Works in any unit as long as both arguments use the same one.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{split_overtime, DEFAULT_OVERTIME_THRESHOLD};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_overtime(Decimal::from_str("45").unwrap(), DEFAULT_OVERTIME_THRESHOLD);
/// assert_eq!(split.regular_hours, Decimal::from_str("40").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("5").unwrap());
/// ```
pub fn split_overtime(total: Decimal, threshold: Decimal) -> OvertimeSplit {
    let total = total.max(Decimal::ZERO);
    let regular = total.min(threshold);
    OvertimeSplit {
        regular_hours: regular,
        overtime_hours: total - regular,
    }
}

/// Returns the first day of the work week containing `date`.
pub fn work_week_start(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let days_back = (7 + date.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    date.checked_sub_signed(TimeDelta::days(i64::from(days_back)))
        .unwrap_or(date)
}

/// Applies the overtime rules to worked seconds booked against dates.
///
/// Buckets are summed in seconds and converted to hours (rounded to two
/// decimal places) once at the end.
pub fn apply_overtime(worked: &[(NaiveDate, i64)], rules: &OvertimeRules) -> OvertimeSplit {
    let mut buckets: BTreeMap<Option<NaiveDate>, i64> = BTreeMap::new();
    for &(date, seconds) in worked {
        let key = match rules.mode {
            OvertimeMode::Weekly => Some(work_week_start(date, rules.week_start)),
            OvertimeMode::PayPeriod => None,
        };
        let bucket = buckets.entry(key).or_insert(0);
        *bucket = bucket.saturating_add(seconds.max(0));
    }

    let threshold_seconds = rules
        .threshold_hours
        .checked_mul(Decimal::from(SECONDS_PER_HOUR))
        .unwrap_or(Decimal::MAX);
    let (regular_seconds, overtime_seconds) = buckets.values().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(regular, overtime), &seconds| {
            let split = split_overtime(Decimal::from(seconds), threshold_seconds);
            (regular + split.regular_hours, overtime + split.overtime_hours)
        },
    );

    let per_hour = Decimal::from(SECONDS_PER_HOUR);
    OvertimeSplit {
        regular_hours: round_hours(regular_seconds / per_hour),
        overtime_hours: round_hours(overtime_seconds / per_hour),
    }
}

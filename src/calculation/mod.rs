//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions of the engine: the pay period
//! calendar, worked-time aggregation, overtime detection and pay stub
//! calculation. None of them touch a store or read the clock.

mod overtime;
mod pay_stub;
mod period_calendar;
mod worked_hours;

pub use overtime::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_OVERTIME_THRESHOLD, OvertimeMode, OvertimeRules,
    OvertimeSplit, apply_overtime, split_overtime, work_week_start,
};
pub use pay_stub::calculate_pay_stub;
pub use period_calendar::{DEFAULT_PERIOD_LENGTH_DAYS, PeriodCalendar};
pub use worked_hours::{
    ROUNDING_DP, SECONDS_PER_HOUR, round_hours, round_money, seconds_to_hours,
};

//! Worked time aggregation and rounding.
//!
//! Time is summed in whole seconds and only converted to hours at the end,
//! so totals do not pick up repeating-decimal drift from per-entry division.

use rust_decimal::{Decimal, RoundingStrategy};

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Decimal places kept on hours and money amounts.
pub const ROUNDING_DP: u32 = 2;

/// Converts seconds to hours, rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::seconds_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(seconds_to_hours(27_000), Decimal::new(750, 2)); // 7.5 hours
/// assert_eq!(seconds_to_hours(1_200), Decimal::new(33, 2)); // 20 minutes
/// ```
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    round_hours(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

/// Rounds an hour figure to two decimal places, half away from zero.
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(ROUNDING_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a money amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(ROUNDING_DP, RoundingStrategy::MidpointAwayFromZero)
}

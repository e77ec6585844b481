//! Pay stub calculation.
//!
//! This module turns an employee's completed time entries for one pay
//! period into the figures of a draft pay stub. It is pure: the same inputs
//! always produce the same [`NewPayStub`].

use rust_decimal::Decimal;

use super::overtime::{OvertimeRules, OvertimeSplit, apply_overtime};
use super::worked_hours::round_money;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, NewPayStub, PayPeriod, PayStubFigures, TimeEntry};

/// Calculates a draft pay stub for one employee and period.
///
/// # Arguments
///
/// * `employee` - The employee being paid; supplies the hourly rate
/// * `entries` - The employee's completed entries dated within `period`
/// * `period` - The pay period being calculated
/// * `rules` - Overtime threshold, multiplier and mode
///
/// # Errors
///
/// Nothing is produced when the input is inconsistent:
/// - [`PayrollError::InvalidPeriod`] if the period starts after it ends
/// - [`PayrollError::PeriodSplitsWorkWeek`] if weekly rules meet a period
///   that does not cover whole work weeks
/// - [`PayrollError::NegativeRate`] if the hourly rate is negative
/// - [`PayrollError::EntryEmployeeMismatch`] if an entry belongs to someone else
/// - [`PayrollError::IncompleteEntry`] if an entry has no clock-out
/// - [`PayrollError::EntryOutsidePeriod`] if an entry is dated outside the period
/// - [`PayrollError::AmountOverflow`] if the gross pay does not fit in a decimal
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_pay_stub, OvertimeRules};
/// use payroll_engine::models::{Employee, EmploymentStatus, PayPeriod, TimeEntry};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     first_name: "Maria".to_string(),
///     last_name: "Lopez".to_string(),
///     job_title: "Lead Teacher".to_string(),
///     hourly_rate: Decimal::new(20, 0),
///     status: EmploymentStatus::Active,
/// };
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
/// )
/// .unwrap();
/// let entry = TimeEntry {
///     id: "te_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     clock_in: NaiveDateTime::parse_from_str("2026-01-13 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     clock_out: Some(NaiveDateTime::parse_from_str("2026-01-13 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
///     break_minutes: None,
/// };
///
/// let stub = calculate_pay_stub(&employee, &[entry], &period, &OvertimeRules::default()).unwrap();
/// assert_eq!(stub.figures.gross_pay, Decimal::new(16000, 2));
/// ```
pub fn calculate_pay_stub(
    employee: &Employee,
    entries: &[TimeEntry],
    period: &PayPeriod,
    rules: &OvertimeRules,
) -> PayrollResult<NewPayStub> {
    period.validate()?;
    rules.check_period(period)?;

    if employee.hourly_rate < Decimal::ZERO {
        return Err(PayrollError::NegativeRate {
            employee_id: employee.id.clone(),
            rate: employee.hourly_rate,
        });
    }

    let mut worked = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.employee_id != employee.id {
            return Err(PayrollError::EntryEmployeeMismatch {
                entry_id: entry.id.clone(),
                entry_employee_id: entry.employee_id.clone(),
                employee_id: employee.id.clone(),
            });
        }
        if !period.contains_date(entry.date) {
            return Err(PayrollError::EntryOutsidePeriod {
                entry_id: entry.id.clone(),
                date: entry.date,
                start: period.start_date,
                end: period.end_date,
            });
        }
        let seconds = entry
            .worked_seconds()
            .ok_or_else(|| PayrollError::IncompleteEntry {
                entry_id: entry.id.clone(),
            })?;
        worked.push((entry.date, seconds));
    }

    let split = apply_overtime(&worked, rules);
    let rate = employee.hourly_rate;
    let gross_pay = gross_amount(&split, rate, rules.multiplier).ok_or_else(|| {
        PayrollError::AmountOverflow {
            employee_id: employee.id.clone(),
        }
    })?;

    Ok(NewPayStub {
        employee_id: employee.id.clone(),
        period_start: period.start_date,
        period_end: period.end_date,
        figures: PayStubFigures {
            hourly_rate: rate,
            regular_hours: split.regular_hours,
            overtime_hours: split.overtime_hours,
            gross_pay,
            // No withholding stage yet.
            net_pay: gross_pay,
        },
    })
}

/// Regular pay plus overtime pay, or `None` if a product overflows.
fn gross_amount(split: &OvertimeSplit, rate: Decimal, multiplier: Decimal) -> Option<Decimal> {
    let regular = split.regular_hours.checked_mul(rate)?;
    let overtime = split
        .overtime_hours
        .checked_mul(rate)?
        .checked_mul(multiplier)?;
    regular.checked_add(overtime).map(round_money)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmploymentStatus;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn create_test_employee(rate: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            job_title: "Lead Teacher".to_string(),
            hourly_rate: dec(rate),
            status: EmploymentStatus::Active,
        }
    }

    fn create_test_period() -> PayPeriod {
        PayPeriod::new(make_date("2026-01-12"), make_date("2026-01-25")).unwrap()
    }

    fn create_entry(id: &str, date: &str, start: &str, end: &str, break_minutes: u32) -> TimeEntry {
        TimeEntry {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            date: make_date(date),
            clock_in: make_datetime(date, start),
            clock_out: Some(make_datetime(date, end)),
            break_minutes: Some(break_minutes),
        }
    }

    /// Five 9-hour days Monday to Friday of the first week: 45 hours.
    fn forty_five_hour_week() -> Vec<TimeEntry> {
        ["2026-01-12", "2026-01-13", "2026-01-14", "2026-01-15", "2026-01-16"]
            .iter()
            .enumerate()
            .map(|(i, date)| create_entry(&format!("te_{:03}", i + 1), date, "08:00:00", "17:30:00", 30))
            .collect()
    }

    /// CALC-001: $20/hr, 45 hours → 40 regular, 5 overtime, $950 gross
    #[test]
    fn test_calc_001_gross_pay_example() {
        let stub = calculate_pay_stub(
            &create_test_employee("20"),
            &forty_five_hour_week(),
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap();

        assert_eq!(stub.figures.regular_hours, dec("40"));
        assert_eq!(stub.figures.overtime_hours, dec("5"));
        assert_eq!(stub.figures.gross_pay, dec("950.00"));
        assert_eq!(stub.figures.net_pay, stub.figures.gross_pay);
        assert_eq!(stub.figures.hourly_rate, dec("20"));
        assert_eq!(stub.employee_id, "emp_001");
        assert_eq!(stub.period_start, make_date("2026-01-12"));
        assert_eq!(stub.period_end, make_date("2026-01-25"));
    }

    /// CALC-002: the same example under period-wide overtime
    #[test]
    fn test_calc_002_gross_pay_example_period_mode() {
        let stub = calculate_pay_stub(
            &create_test_employee("20"),
            &forty_five_hour_week(),
            &create_test_period(),
            &OvertimeRules::pay_period(),
        )
        .unwrap();
        assert_eq!(stub.figures.gross_pay, dec("950.00"));
    }

    /// CALC-003: hours split across two weeks avoid weekly overtime
    #[test]
    fn test_calc_003_split_weeks() {
        let entries = vec![
            create_entry("te_001", "2026-01-12", "08:00:00", "18:00:00", 0),
            create_entry("te_002", "2026-01-13", "08:00:00", "18:00:00", 0),
            create_entry("te_003", "2026-01-19", "08:00:00", "18:00:00", 0),
            create_entry("te_004", "2026-01-20", "08:00:00", "18:00:00", 0),
            create_entry("te_005", "2026-01-21", "08:00:00", "13:00:00", 0),
        ];
        let employee = create_test_employee("20");
        let period = create_test_period();

        let weekly = calculate_pay_stub(&employee, &entries, &period, &OvertimeRules::default()).unwrap();
        assert_eq!(weekly.figures.regular_hours, dec("45"));
        assert_eq!(weekly.figures.overtime_hours, Decimal::ZERO);
        assert_eq!(weekly.figures.gross_pay, dec("900.00"));

        let period_wide =
            calculate_pay_stub(&employee, &entries, &period, &OvertimeRules::pay_period()).unwrap();
        assert_eq!(period_wide.figures.overtime_hours, dec("5"));
        assert_eq!(period_wide.figures.gross_pay, dec("950.00"));
    }

    /// CALC-004: no entries yields a zero stub
    #[test]
    fn test_calc_004_no_entries() {
        let stub = calculate_pay_stub(
            &create_test_employee("20"),
            &[],
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap();
        assert_eq!(stub.figures.regular_hours, Decimal::ZERO);
        assert_eq!(stub.figures.overtime_hours, Decimal::ZERO);
        assert_eq!(stub.figures.gross_pay, Decimal::ZERO);
    }

    /// CALC-005: negative rate is rejected
    #[test]
    fn test_calc_005_negative_rate() {
        let err = calculate_pay_stub(
            &create_test_employee("-1"),
            &forty_five_hour_week(),
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::NegativeRate { .. }));
    }

    /// CALC-006: entry outside the period is rejected, not dropped
    #[test]
    fn test_calc_006_entry_outside_period() {
        let mut entries = forty_five_hour_week();
        entries.push(create_entry("te_late", "2026-01-26", "09:00:00", "17:00:00", 0));

        let err = calculate_pay_stub(
            &create_test_employee("20"),
            &entries,
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap_err();
        match err {
            PayrollError::EntryOutsidePeriod { entry_id, date, .. } => {
                assert_eq!(entry_id, "te_late");
                assert_eq!(date, make_date("2026-01-26"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// CALC-007: open entry is rejected
    #[test]
    fn test_calc_007_incomplete_entry() {
        let mut entry = create_entry("te_open", "2026-01-13", "09:00:00", "17:00:00", 0);
        entry.clock_out = None;

        let err = calculate_pay_stub(
            &create_test_employee("20"),
            &[entry],
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::IncompleteEntry { .. }));
    }

    /// CALC-008: negative durations contribute zero hours
    #[test]
    fn test_calc_008_negative_duration_guard() {
        let entries = vec![
            create_entry("te_backwards", "2026-01-13", "17:00:00", "09:00:00", 0),
            create_entry("te_long_break", "2026-01-14", "09:00:00", "10:00:00", 120),
            create_entry("te_ok", "2026-01-15", "09:00:00", "17:00:00", 0),
        ];
        let stub = calculate_pay_stub(
            &create_test_employee("20"),
            &entries,
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap();
        assert_eq!(stub.figures.regular_hours, dec("8"));
        assert_eq!(stub.figures.overtime_hours, Decimal::ZERO);
        assert_eq!(stub.figures.gross_pay, dec("160.00"));
    }

    #[test]
    fn test_entry_for_other_employee_rejected() {
        let mut entry = create_entry("te_001", "2026-01-13", "09:00:00", "17:00:00", 0);
        entry.employee_id = "emp_002".to_string();
        let err = calculate_pay_stub(
            &create_test_employee("20"),
            &[entry],
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::EntryEmployeeMismatch { .. }));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let period = PayPeriod {
            start_date: make_date("2026-01-25"),
            end_date: make_date("2026-01-12"),
        };
        let err = calculate_pay_stub(
            &create_test_employee("20"),
            &[],
            &period,
            &OvertimeRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_gross_rounded_to_cents() {
        // 7h 20m at $18.35 = 7.33 * 18.35 = 134.5055 → 134.51
        let entries = vec![create_entry("te_001", "2026-01-13", "09:00:00", "16:20:00", 0)];
        let stub = calculate_pay_stub(
            &create_test_employee("18.35"),
            &entries,
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap();
        assert_eq!(stub.figures.regular_hours, dec("7.33"));
        assert_eq!(stub.figures.gross_pay, dec("134.51"));
    }

    #[test]
    fn test_zero_rate_allowed() {
        let stub = calculate_pay_stub(
            &create_test_employee("0"),
            &forty_five_hour_week(),
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap();
        assert_eq!(stub.figures.gross_pay, Decimal::ZERO);
        assert_eq!(stub.figures.total_hours(), dec("45"));
    }

    #[test]
    fn test_rate_too_large_for_gross_rejected() {
        let err = calculate_pay_stub(
            &create_test_employee("79228162514264337593543950335"),
            &forty_five_hour_week(),
            &create_test_period(),
            &OvertimeRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::AmountOverflow { ref employee_id } if employee_id == "emp_001"));
    }

    /// A Wednesday-to-Tuesday period would threshold the week of 12 Jan
    /// separately in two stubs.
    #[test]
    fn test_weekly_rules_reject_period_splitting_a_week() {
        let period = PayPeriod::new(make_date("2026-01-07"), make_date("2026-01-20")).unwrap();
        let entries = vec![create_entry("te_001", "2026-01-13", "08:00:00", "18:00:00", 0)];
        let employee = create_test_employee("20");

        let err = calculate_pay_stub(&employee, &entries, &period, &OvertimeRules::default())
            .unwrap_err();
        assert!(matches!(err, PayrollError::PeriodSplitsWorkWeek { .. }));

        let stub =
            calculate_pay_stub(&employee, &entries, &period, &OvertimeRules::pay_period()).unwrap();
        assert_eq!(stub.figures.regular_hours, dec("10"));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let employee = create_test_employee("23.75");
        let entries = forty_five_hour_week();
        let period = create_test_period();
        let rules = OvertimeRules::default();

        let first = calculate_pay_stub(&employee, &entries, &period, &rules).unwrap();
        let second = calculate_pay_stub(&employee, &entries, &period, &rules).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_hours_never_negative(
            start_minute in 0i64..1440,
            length_minutes in -600i64..900,
            break_minutes in 0u32..600,
        ) {
            let date = make_date("2026-01-13");
            let clock_in = date.and_hms_opt(0, 0, 0).unwrap() + chrono::TimeDelta::minutes(start_minute);
            let entry = TimeEntry {
                id: "te_prop".to_string(),
                employee_id: "emp_001".to_string(),
                date,
                clock_in,
                clock_out: Some(clock_in + chrono::TimeDelta::minutes(length_minutes)),
                break_minutes: Some(break_minutes),
            };
            let stub = calculate_pay_stub(
                &create_test_employee("20"),
                &[entry],
                &create_test_period(),
                &OvertimeRules::default(),
            )
            .unwrap();
            prop_assert!(stub.figures.regular_hours >= Decimal::ZERO);
            prop_assert!(stub.figures.overtime_hours >= Decimal::ZERO);
            prop_assert!(stub.figures.gross_pay >= Decimal::ZERO);
        }
    }
}

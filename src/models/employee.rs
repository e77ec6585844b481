//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct and [`EmploymentStatus`] enum
//! for representing centre staff in the payroll system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents whether an employee is currently on payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and paid by payroll runs.
    Active,
    /// Temporarily off payroll (e.g. extended leave).
    Inactive,
    /// Employment has ended.
    Terminated,
}

/// Represents an employee paid by the hour.
///
/// Employees are never deleted. They are deactivated by changing
/// [`Employee::status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title (e.g., "Lead Teacher").
    #[serde(default)]
    pub job_title: String,
    /// Hourly pay rate in dollars.
    pub hourly_rate: Decimal,
    /// Current employment status.
    pub status: EmploymentStatus,
}

impl Employee {
    /// Returns true if the employee is included in payroll runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Maria".to_string(),
    ///     last_name: "Lopez".to_string(),
    ///     job_title: "Lead Teacher".to_string(),
    ///     hourly_rate: Decimal::new(2000, 2),
    ///     status: EmploymentStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(job_title) = update.job_title {
            self.job_title = job_title;
        }
        if let Some(hourly_rate) = update.hourly_rate {
            self.hourly_rate = hourly_rate;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// A partial update to an [`Employee`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// New job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// New hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// New employment status.
    #[serde(default)]
    pub status: Option<EmploymentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(status: EmploymentStatus) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            job_title: "Lead Teacher".to_string(),
            hourly_rate: Decimal::new(2000, 2),
            status,
        }
    }

    #[test]
    fn test_deserialize_active_employee() {
        let json = r#"{
            "id": "emp_001",
            "first_name": "Maria",
            "last_name": "Lopez",
            "job_title": "Lead Teacher",
            "hourly_rate": "20.00",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.hourly_rate, Decimal::new(2000, 2));
        assert_eq!(employee.status, EmploymentStatus::Active);
    }

    #[test]
    fn test_job_title_defaults_to_empty() {
        let json = r#"{
            "id": "emp_002",
            "first_name": "Sam",
            "last_name": "Okafor",
            "hourly_rate": "18.50",
            "status": "terminated"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.job_title.is_empty());
        assert_eq!(employee.status, EmploymentStatus::Terminated);
    }

    #[test]
    fn test_is_active_only_for_active_status() {
        assert!(create_test_employee(EmploymentStatus::Active).is_active());
        assert!(!create_test_employee(EmploymentStatus::Inactive).is_active());
        assert!(!create_test_employee(EmploymentStatus::Terminated).is_active());
    }

    #[test]
    fn test_apply_partial_update_keeps_other_fields() {
        let mut employee = create_test_employee(EmploymentStatus::Active);
        employee.apply(EmployeeUpdate {
            hourly_rate: Some(Decimal::new(2250, 2)),
            ..EmployeeUpdate::default()
        });

        assert_eq!(employee.hourly_rate, Decimal::new(2250, 2));
        assert_eq!(employee.first_name, "Maria");
        assert_eq!(employee.status, EmploymentStatus::Active);
    }

    #[test]
    fn test_apply_deactivation() {
        let mut employee = create_test_employee(EmploymentStatus::Active);
        employee.apply(EmployeeUpdate {
            status: Some(EmploymentStatus::Inactive),
            ..EmployeeUpdate::default()
        });
        assert!(!employee.is_active());
    }

    #[test]
    fn test_employment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Terminated).unwrap(),
            "\"terminated\""
        );
    }
}

//! Employee registry contract and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::{read_lock, write_lock};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, EmployeeUpdate, EmploymentStatus};

/// Filter for [`EmployeeRegistry::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Only employees with this status.
    #[serde(default)]
    pub status: Option<EmploymentStatus>,
}

impl EmployeeFilter {
    /// Matches active employees only.
    pub fn active() -> Self {
        Self {
            status: Some(EmploymentStatus::Active),
        }
    }

    fn matches(&self, employee: &Employee) -> bool {
        self.status.is_none_or(|status| employee.status == status)
    }
}

/// Holds employee identity, pay rate and employment status.
///
/// Employees are never deleted; deactivate them through
/// [`EmployeeRegistry::update`].
pub trait EmployeeRegistry: Send + Sync {
    /// Lists employees matching the filter, ordered by id.
    fn list(&self, filter: &EmployeeFilter) -> PayrollResult<Vec<Employee>>;
    /// Returns one employee.
    fn get(&self, id: &str) -> PayrollResult<Employee>;
    /// Adds an employee.
    fn create(&self, employee: Employee) -> PayrollResult<Employee>;
    /// Applies a partial update and returns the updated employee.
    fn update(&self, id: &str, update: EmployeeUpdate) -> PayrollResult<Employee>;
}

/// An [`EmployeeRegistry`] backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRegistry {
    employees: RwLock<BTreeMap<String, Employee>>,
}

impl InMemoryEmployeeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeRegistry for InMemoryEmployeeRegistry {
    fn list(&self, filter: &EmployeeFilter) -> PayrollResult<Vec<Employee>> {
        let employees = read_lock(&self.employees);
        Ok(employees
            .values()
            .filter(|employee| filter.matches(employee))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> PayrollResult<Employee> {
        read_lock(&self.employees)
            .get(id)
            .cloned()
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                employee_id: id.to_string(),
            })
    }

    fn create(&self, employee: Employee) -> PayrollResult<Employee> {
        let mut employees = write_lock(&self.employees);
        if employees.contains_key(&employee.id) {
            return Err(PayrollError::DuplicateRecord {
                record: "Employee",
                id: employee.id,
            });
        }
        employees.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    fn update(&self, id: &str, update: EmployeeUpdate) -> PayrollResult<Employee> {
        let mut employees = write_lock(&self.employees);
        let employee = employees
            .get_mut(id)
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                employee_id: id.to_string(),
            })?;
        employee.apply(update);
        Ok(employee.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn employee(id: &str, status: EmploymentStatus) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            job_title: "Assistant Teacher".to_string(),
            hourly_rate: Decimal::new(1800, 2),
            status,
        }
    }

    fn seeded() -> InMemoryEmployeeRegistry {
        let registry = InMemoryEmployeeRegistry::new();
        registry.create(employee("emp_002", EmploymentStatus::Active)).unwrap();
        registry.create(employee("emp_001", EmploymentStatus::Active)).unwrap();
        registry.create(employee("emp_003", EmploymentStatus::Terminated)).unwrap();
        registry
    }

    #[test]
    fn test_list_all_ordered_by_id() {
        let ids: Vec<String> = seeded()
            .list(&EmployeeFilter::default())
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002", "emp_003"]);
    }

    #[test]
    fn test_list_active_only() {
        let active = seeded().list(&EmployeeFilter::active()).unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(Employee::is_active));
    }

    #[test]
    fn test_get_missing() {
        let err = seeded().get("emp_999").unwrap_err();
        assert!(matches!(err, PayrollError::EmployeeNotFound { .. }));
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let registry = seeded();
        let err = registry
            .create(employee("emp_001", EmploymentStatus::Active))
            .unwrap_err();
        assert!(matches!(err, PayrollError::DuplicateRecord { .. }));
    }

    #[test]
    fn test_update_rate_and_status() {
        let registry = seeded();
        let updated = registry
            .update(
                "emp_001",
                EmployeeUpdate {
                    hourly_rate: Some(Decimal::new(2100, 2)),
                    status: Some(EmploymentStatus::Inactive),
                    ..EmployeeUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.hourly_rate, Decimal::new(2100, 2));
        assert_eq!(registry.get("emp_001").unwrap().status, EmploymentStatus::Inactive);
    }
}

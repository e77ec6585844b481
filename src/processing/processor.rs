//! Batch payroll processing.
//!
//! [`PayrollProcessor::process`] creates the missing draft stubs for one pay
//! period across all active employees. Re-running it for the same period is
//! a no-op, and one employee's failure never stops the others.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{OvertimeRules, calculate_pay_stub};
use crate::error::{ErrorKind, PayrollError, PayrollResult};
use crate::models::{Employee, PayPeriod, PayStub, PayStubUpdate, TimeEntry};
use crate::store::{EmployeeFilter, EmployeeRegistry, PayStubStore, TimeEntryFilter, TimeEntryStore};

/// A per-employee failure collected during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// The employee whose stub could not be created.
    pub employee_id: String,
    /// Category of the failure.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub reason: String,
}

/// The result of one processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Stubs created by this run.
    pub created: Vec<PayStub>,
    /// Employees skipped: already processed, or no completed entries.
    pub skipped: Vec<String>,
    /// Employees whose calculation failed.
    pub errors: Vec<EmployeeFailure>,
}

enum EmployeeOutcome {
    Created(PayStub),
    AlreadyProcessed,
    NoCompletedEntries,
}

/// Generates pay stubs from time entries.
#[derive(Clone)]
pub struct PayrollProcessor {
    employees: Arc<dyn EmployeeRegistry>,
    entries: Arc<dyn TimeEntryStore>,
    stubs: Arc<dyn PayStubStore>,
    rules: OvertimeRules,
}

impl PayrollProcessor {
    /// Creates a processor over the given stores.
    pub fn new(
        employees: Arc<dyn EmployeeRegistry>,
        entries: Arc<dyn TimeEntryStore>,
        stubs: Arc<dyn PayStubStore>,
        rules: OvertimeRules,
    ) -> Self {
        Self {
            employees,
            entries,
            stubs,
            rules,
        }
    }

    /// Returns the overtime rules used for calculation.
    pub fn rules(&self) -> &OvertimeRules {
        &self.rules
    }

    /// Creates draft stubs for the period `[period_start, period_end]`.
    ///
    /// For each active employee, in id order:
    /// - an existing stub for exactly this period → skipped
    /// - no completed entries dated in the period → skipped (no zero-hour stub)
    /// - otherwise the stub is calculated and persisted
    ///
    /// Calculation and store failures are recorded in
    /// [`ProcessOutcome::errors`] and processing continues. The call itself
    /// fails only for an inverted period, for a period that splits a work
    /// week under weekly overtime, or when the employee list cannot be read.
    pub fn process(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> PayrollResult<ProcessOutcome> {
        let period = PayPeriod::new(period_start, period_end)?;
        self.process_period(&period)
    }

    /// Same as [`PayrollProcessor::process`] for an already-built period.
    pub fn process_period(&self, period: &PayPeriod) -> PayrollResult<ProcessOutcome> {
        period.validate()?;
        self.rules.check_period(period)?;
        let employees = self.employees.list(&EmployeeFilter::active())?;
        let mut outcome = ProcessOutcome::default();

        for employee in &employees {
            match self.process_employee(employee, period) {
                Ok(EmployeeOutcome::Created(stub)) => outcome.created.push(stub),
                Ok(EmployeeOutcome::AlreadyProcessed) => {
                    debug!(employee_id = %employee.id, "Skipped: stub already exists");
                    outcome.skipped.push(employee.id.clone());
                }
                Ok(EmployeeOutcome::NoCompletedEntries) => {
                    debug!(employee_id = %employee.id, "Skipped: no completed entries");
                    outcome.skipped.push(employee.id.clone());
                }
                Err(err) => {
                    warn!(employee_id = %employee.id, error = %err, "Pay stub calculation failed");
                    outcome.errors.push(EmployeeFailure {
                        employee_id: employee.id.clone(),
                        kind: err.kind(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            period_start = %period.start_date,
            period_end = %period.end_date,
            employees = employees.len(),
            created = outcome.created.len(),
            skipped = outcome.skipped.len(),
            errors = outcome.errors.len(),
            "Payroll run completed"
        );
        Ok(outcome)
    }

    fn process_employee(
        &self,
        employee: &Employee,
        period: &PayPeriod,
    ) -> PayrollResult<EmployeeOutcome> {
        if self
            .stubs
            .find_by_period(&employee.id, period.start_date, period.end_date)?
            .is_some()
        {
            return Ok(EmployeeOutcome::AlreadyProcessed);
        }

        let entries = self.completed_entries(&employee.id, period)?;
        if entries.is_empty() {
            return Ok(EmployeeOutcome::NoCompletedEntries);
        }

        let new_stub = calculate_pay_stub(employee, &entries, period, &self.rules)?;
        match self.stubs.create(new_stub) {
            Ok(stub) => Ok(EmployeeOutcome::Created(stub)),
            // Another run created it between the check and the insert.
            Err(PayrollError::DuplicatePayStub { .. }) => Ok(EmployeeOutcome::AlreadyProcessed),
            Err(err) => Err(err),
        }
    }

    fn completed_entries(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> PayrollResult<Vec<TimeEntry>> {
        let filter =
            TimeEntryFilter::for_employee_between(employee_id, period.start_date, period.end_date);
        Ok(self
            .entries
            .list(&filter)?
            .into_iter()
            .filter(TimeEntry::is_completed)
            .collect())
    }

    /// Re-derives a draft stub's figures from the current entries and rate.
    ///
    /// Finalized and paid stubs keep their stamped figures and are rejected
    /// with [`PayrollError::StubLocked`].
    pub fn recalculate(&self, stub_id: Uuid) -> PayrollResult<PayStub> {
        let stub = self.stubs.get(stub_id)?;
        if stub.is_locked() {
            return Err(PayrollError::StubLocked {
                stub_id,
                status: stub.status,
            });
        }

        let employee = self.employees.get(&stub.employee_id)?;
        let period = stub.period();
        let entries = self.completed_entries(&employee.id, &period)?;
        let recalculated = calculate_pay_stub(&employee, &entries, &period, &self.rules)?;

        let updated = self
            .stubs
            .update(stub_id, PayStubUpdate::recalculate(recalculated.figures))?;
        info!(stub_id = %stub_id, gross_pay = %updated.gross_pay, "Pay stub recalculated");
        Ok(updated)
    }
}

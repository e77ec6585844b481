//! Pay stub store contract and in-memory implementation.
//!
//! The store owns two invariants:
//! - at most one stub exists per (employee, period start, period end), checked
//!   and recorded under the same write lock as the insert
//! - status changes follow [`PayStub::apply_update`]

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{read_lock, write_lock};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{NewPayStub, PayStub, PayStubUpdate};

/// Filter for [`PayStubStore::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubFilter {
    /// Only stubs of this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Persists one pay stub per employee and period.
pub trait PayStubStore: Send + Sync {
    /// Lists stubs matching the filter, ordered by period then employee.
    fn list(&self, filter: &PayStubFilter) -> PayrollResult<Vec<PayStub>>;
    /// Returns one stub.
    fn get(&self, id: Uuid) -> PayrollResult<PayStub>;
    /// Persists a calculated stub as a draft.
    ///
    /// Fails with [`PayrollError::DuplicatePayStub`] if a stub already exists
    /// for the same employee and period.
    fn create(&self, stub: NewPayStub) -> PayrollResult<PayStub>;
    /// Advances status, sets the pay date or replaces draft figures.
    fn update(&self, id: Uuid, update: PayStubUpdate) -> PayrollResult<PayStub>;
    /// Returns the stub for exactly this employee and period, if any.
    fn find_by_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PayrollResult<Option<PayStub>>;
    /// Removes a draft stub. Finalized and paid stubs are never deleted.
    fn delete(&self, id: Uuid) -> PayrollResult<()>;
}

type PeriodKey = (String, NaiveDate, NaiveDate);

#[derive(Debug, Default)]
struct Stubs {
    by_id: HashMap<Uuid, PayStub>,
    by_period: HashMap<PeriodKey, Uuid>,
}

/// A [`PayStubStore`] backed by maps.
#[derive(Debug, Default)]
pub struct InMemoryPayStubStore {
    stubs: RwLock<Stubs>,
}

impl InMemoryPayStubStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayStubStore for InMemoryPayStubStore {
    fn list(&self, filter: &PayStubFilter) -> PayrollResult<Vec<PayStub>> {
        let stubs = read_lock(&self.stubs);
        let mut matching: Vec<PayStub> = stubs
            .by_id
            .values()
            .filter(|stub| {
                filter
                    .employee_id
                    .as_deref()
                    .is_none_or(|id| stub.employee_id == id)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            (a.period_start, a.period_end, &a.employee_id).cmp(&(
                b.period_start,
                b.period_end,
                &b.employee_id,
            ))
        });
        Ok(matching)
    }

    fn get(&self, id: Uuid) -> PayrollResult<PayStub> {
        read_lock(&self.stubs)
            .by_id
            .get(&id)
            .cloned()
            .ok_or(PayrollError::PayStubNotFound { stub_id: id })
    }

    fn create(&self, stub: NewPayStub) -> PayrollResult<PayStub> {
        let key = (stub.employee_id.clone(), stub.period_start, stub.period_end);
        let mut stubs = write_lock(&self.stubs);
        if stubs.by_period.contains_key(&key) {
            return Err(PayrollError::DuplicatePayStub {
                employee_id: stub.employee_id,
                start: stub.period_start,
                end: stub.period_end,
            });
        }

        let stub = PayStub::from_new(stub, Uuid::new_v4(), Utc::now());
        stubs.by_period.insert(key, stub.id);
        stubs.by_id.insert(stub.id, stub.clone());
        debug!(stub_id = %stub.id, employee_id = %stub.employee_id, "Pay stub created");
        Ok(stub)
    }

    fn update(&self, id: Uuid, update: PayStubUpdate) -> PayrollResult<PayStub> {
        let mut stubs = write_lock(&self.stubs);
        let stored = stubs
            .by_id
            .get_mut(&id)
            .ok_or(PayrollError::PayStubNotFound { stub_id: id })?;
        stored.apply_update(update, Utc::now())?;
        debug!(stub_id = %id, status = %stored.status, "Pay stub updated");
        Ok(stored.clone())
    }

    fn find_by_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PayrollResult<Option<PayStub>> {
        let stubs = read_lock(&self.stubs);
        let key = (employee_id.to_string(), start, end);
        Ok(stubs
            .by_period
            .get(&key)
            .and_then(|id| stubs.by_id.get(id))
            .cloned())
    }

    fn delete(&self, id: Uuid) -> PayrollResult<()> {
        let mut stubs = write_lock(&self.stubs);
        let stub = stubs
            .by_id
            .get(&id)
            .ok_or(PayrollError::PayStubNotFound { stub_id: id })?;
        if stub.is_locked() {
            return Err(PayrollError::StubLocked {
                stub_id: id,
                status: stub.status,
            });
        }
        let key = (stub.employee_id.clone(), stub.period_start, stub.period_end);
        stubs.by_period.remove(&key);
        stubs.by_id.remove(&id);
        Ok(())
    }
}

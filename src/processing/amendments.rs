//! Time entry changes that respect finalized pay stubs.
//!
//! Once an employee's stub for a period is finalized, their entries dated in
//! that period are frozen: amending one, or recording a new one, is rejected
//! with [`PayrollError::EntryLocked`].

use tracing::warn;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{TimeEntry, TimeEntryUpdate};
use crate::store::{PayStubFilter, PayStubStore, TimeEntryStore};

fn ensure_unlocked(stubs: &dyn PayStubStore, entry: &TimeEntry) -> PayrollResult<()> {
    let filter = PayStubFilter {
        employee_id: Some(entry.employee_id.clone()),
    };
    let locking = stubs
        .list(&filter)?
        .into_iter()
        .find(|stub| stub.is_locked() && stub.period().contains_date(entry.date));

    match locking {
        Some(stub) => {
            warn!(
                entry_id = %entry.id,
                stub_id = %stub.id,
                status = %stub.status,
                "Rejected change to time entry in a locked period"
            );
            Err(PayrollError::EntryLocked {
                entry_id: entry.id.clone(),
                stub_id: stub.id,
            })
        }
        None => Ok(()),
    }
}

/// Records a new time entry unless its period is already finalized.
///
/// Same concurrency contract as [`amend_time_entry`].
pub fn record_time_entry(
    entries: &dyn TimeEntryStore,
    stubs: &dyn PayStubStore,
    entry: TimeEntry,
) -> PayrollResult<TimeEntry> {
    ensure_unlocked(stubs, &entry)?;
    entries.create(entry)
}

/// Amends a time entry unless it is covered by a finalized or paid stub.
///
/// The lock check and the write are separate store calls. Callers that
/// finalize stubs concurrently must serialize both behind one lock, as the
/// HTTP layer does with its ledger lock.
pub fn amend_time_entry(
    entries: &dyn TimeEntryStore,
    stubs: &dyn PayStubStore,
    entry_id: &str,
    update: TimeEntryUpdate,
) -> PayrollResult<TimeEntry> {
    let entry = entries.get(entry_id)?;
    ensure_unlocked(stubs, &entry)?;
    entries.update(entry_id, update)
}

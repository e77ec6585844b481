//! Repository contracts for the payroll engine.
//!
//! Each entity type has a trait describing the operations the engine needs
//! (create, read, update, list) and an in-memory implementation. The traits
//! are synchronous and `Send + Sync` so one store can be shared between
//! request handlers behind an `Arc`.

mod employee_registry;
mod pay_stub_store;
mod time_entry_store;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use employee_registry::{EmployeeFilter, EmployeeRegistry, InMemoryEmployeeRegistry};
pub use pay_stub_store::{InMemoryPayStubStore, PayStubFilter, PayStubStore};
pub use time_entry_store::{InMemoryTimeEntryStore, TimeEntryFilter, TimeEntryStore};

// A panicked writer cannot leave a map half-updated: every mutation is a
// single insert performed after validation.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

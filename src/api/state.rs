//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ConfigLoader;
use crate::processing::PayrollProcessor;
use crate::store::{
    EmployeeRegistry, InMemoryEmployeeRegistry, InMemoryPayStubStore, InMemoryTimeEntryStore,
    PayStubStore, TimeEntryStore,
};

/// Shared application state.
///
/// Holds the loaded configuration, the three stores and a processor wired
/// to them. Cloning is cheap; every field is reference counted.
///
/// The ledger lock is held by every handler that writes a time entry or
/// changes a stub's status, so an entry is never amended between the
/// locked-period check and the write while its stub is being finalized.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    employees: Arc<dyn EmployeeRegistry>,
    entries: Arc<dyn TimeEntryStore>,
    stubs: Arc<dyn PayStubStore>,
    processor: PayrollProcessor,
    ledger: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates application state over the given stores.
    pub fn new(
        config: ConfigLoader,
        employees: Arc<dyn EmployeeRegistry>,
        entries: Arc<dyn TimeEntryStore>,
        stubs: Arc<dyn PayStubStore>,
    ) -> Self {
        let processor = PayrollProcessor::new(
            Arc::clone(&employees),
            Arc::clone(&entries),
            Arc::clone(&stubs),
            *config.overtime_rules(),
        );
        Self {
            config: Arc::new(config),
            employees,
            entries,
            stubs,
            processor,
            ledger: Arc::new(Mutex::new(())),
        }
    }

    /// Creates application state backed by empty in-memory stores.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryEmployeeRegistry::new()),
            Arc::new(InMemoryTimeEntryStore::new()),
            Arc::new(InMemoryPayStubStore::new()),
        )
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee registry.
    pub fn employees(&self) -> &dyn EmployeeRegistry {
        self.employees.as_ref()
    }

    /// Returns the time entry store.
    pub fn entries(&self) -> &dyn TimeEntryStore {
        self.entries.as_ref()
    }

    /// Returns the pay stub store.
    pub fn stubs(&self) -> &dyn PayStubStore {
        self.stubs.as_ref()
    }

    /// Returns the payroll processor.
    pub fn processor(&self) -> &PayrollProcessor {
        &self.processor
    }

    /// Serializes time entry writes against stub status changes.
    pub fn lock_ledger(&self) -> MutexGuard<'_, ()> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

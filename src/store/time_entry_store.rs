//! Time entry store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{read_lock, write_lock};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{TimeEntry, TimeEntryUpdate};

/// Filter for [`TimeEntryStore::list`]. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryFilter {
    /// Only entries of this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only entries dated on or after this date.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Only entries dated on or before this date.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl TimeEntryFilter {
    /// Matches one employee's entries within an inclusive date range.
    pub fn for_employee_between(employee_id: &str, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            employee_id: Some(employee_id.to_string()),
            date_from: Some(from),
            date_to: Some(to),
        }
    }

    fn matches(&self, entry: &TimeEntry) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| entry.employee_id == id)
            && self.date_from.is_none_or(|from| entry.date >= from)
            && self.date_to.is_none_or(|to| entry.date <= to)
    }
}

/// Holds raw clock-in/clock-out records.
pub trait TimeEntryStore: Send + Sync {
    /// Lists entries matching the filter, ordered by date then clock-in.
    fn list(&self, filter: &TimeEntryFilter) -> PayrollResult<Vec<TimeEntry>>;
    /// Returns one entry.
    fn get(&self, id: &str) -> PayrollResult<TimeEntry>;
    /// Records a new entry (normally at clock-in).
    fn create(&self, entry: TimeEntry) -> PayrollResult<TimeEntry>;
    /// Amends an entry and returns the amended record.
    fn update(&self, id: &str, update: TimeEntryUpdate) -> PayrollResult<TimeEntry>;
}

/// A [`TimeEntryStore`] backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryTimeEntryStore {
    entries: RwLock<HashMap<String, TimeEntry>>,
}

impl InMemoryTimeEntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeEntryStore for InMemoryTimeEntryStore {
    fn list(&self, filter: &TimeEntryFilter) -> PayrollResult<Vec<TimeEntry>> {
        let entries = read_lock(&self.entries);
        let mut matching: Vec<TimeEntry> = entries
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            (a.date, a.clock_in, &a.id).cmp(&(b.date, b.clock_in, &b.id))
        });
        Ok(matching)
    }

    fn get(&self, id: &str) -> PayrollResult<TimeEntry> {
        read_lock(&self.entries)
            .get(id)
            .cloned()
            .ok_or_else(|| PayrollError::TimeEntryNotFound {
                entry_id: id.to_string(),
            })
    }

    fn create(&self, entry: TimeEntry) -> PayrollResult<TimeEntry> {
        entry.validate()?;
        let mut entries = write_lock(&self.entries);
        if entries.contains_key(&entry.id) {
            return Err(PayrollError::DuplicateRecord {
                record: "Time entry",
                id: entry.id,
            });
        }
        entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn update(&self, id: &str, update: TimeEntryUpdate) -> PayrollResult<TimeEntry> {
        let mut entries = write_lock(&self.entries);
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| PayrollError::TimeEntryNotFound {
                entry_id: id.to_string(),
            })?;
        entry.apply(update);
        Ok(entry.clone())
    }
}

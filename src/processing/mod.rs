//! Operations that span several records: batch stub generation and
//! lock-aware time entry changes.

mod amendments;
mod processor;

pub use amendments::{amend_time_entry, record_time_entry};
pub use processor::{EmployeeFailure, PayrollProcessor, ProcessOutcome};

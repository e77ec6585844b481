//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_period;
mod pay_stub;
mod time_entry;

pub use employee::{Employee, EmployeeUpdate, EmploymentStatus};
pub use pay_period::PayPeriod;
pub use pay_stub::{NewPayStub, PayStub, PayStubFigures, PayStubStatus, PayStubUpdate};
pub use time_entry::{TimeEntry, TimeEntryUpdate};

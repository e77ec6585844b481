//! Payroll engine for hourly childcare staff
//!
//! This crate turns clock-in/clock-out records into pay stubs: it computes
//! worked hours, splits them into regular and overtime hours, prices them at
//! the employee's hourly rate and tracks each stub from draft to paid.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod store;

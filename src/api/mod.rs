//! HTTP API for the payroll engine.
//!
//! Exposes employees, time entries, pay periods and pay stubs as JSON
//! endpoints over an [`AppState`].

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayRequest, ProcessRequest, TodayQuery, YearQuery};
pub use response::{ApiError, ApiErrorResponse, TimeEntryResponse};
pub use state::AppState;

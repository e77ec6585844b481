//! Request types for the payroll API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /payroll/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
}

/// Body of `POST /pay-stubs/:id/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRequest {
    /// The date the stub is paid.
    pub pay_date: NaiveDate,
}

/// Query of `GET /pay-periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearQuery {
    /// Calendar year to generate periods for.
    pub year: i32,
}

/// Query of `GET /pay-periods/current`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodayQuery {
    /// The date to look up; defaults to the server's UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

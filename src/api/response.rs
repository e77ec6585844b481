//! Response types for the payroll API.
//!
//! This module defines the error response structures and the mapping from
//! [`PayrollError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PayrollError};
use crate::models::TimeEntry;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn error_code(error: &PayrollError) -> &'static str {
    match error {
        PayrollError::ConfigNotFound { .. }
        | PayrollError::ConfigParseError { .. }
        | PayrollError::InvalidConfig { .. } => "CONFIG_ERROR",
        PayrollError::NegativeRate { .. } => "NEGATIVE_RATE",
        PayrollError::EntryOutsidePeriod { .. } => "ENTRY_OUTSIDE_PERIOD",
        PayrollError::IncompleteEntry { .. } => "INCOMPLETE_ENTRY",
        PayrollError::EntryEmployeeMismatch { .. } => "ENTRY_EMPLOYEE_MISMATCH",
        PayrollError::InvalidPeriod { .. } => "INVALID_PERIOD",
        PayrollError::PeriodSplitsWorkWeek { .. } => "PERIOD_SPLITS_WORK_WEEK",
        PayrollError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        PayrollError::InvalidTimeEntry { .. } => "INVALID_TIME_ENTRY",
        PayrollError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
        PayrollError::MissingPayDate { .. } => "MISSING_PAY_DATE",
        PayrollError::StubLocked { .. } => "STUB_LOCKED",
        PayrollError::EntryLocked { .. } => "ENTRY_LOCKED",
        PayrollError::DuplicatePayStub { .. } => "DUPLICATE_PAY_STUB",
        PayrollError::DuplicateRecord { .. } => "DUPLICATE_RECORD",
        PayrollError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
        PayrollError::TimeEntryNotFound { .. } => "TIME_ENTRY_NOT_FOUND",
        PayrollError::PayStubNotFound { .. } => "PAY_STUB_NOT_FOUND",
        PayrollError::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let kind = error.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::Lifecycle => StatusCode::CONFLICT,
            ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let code = error_code(&error);
        let error = match kind {
            ErrorKind::Config => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            _ => ApiError::new(code, error.to_string()),
        };
        ApiErrorResponse { status, error }
    }
}

/// A time entry together with its derived hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntryResponse {
    /// The stored entry.
    #[serde(flatten)]
    pub entry: TimeEntry,
    /// Whether the entry has been clocked out.
    pub completed: bool,
    /// Hours worked, absent until clock-out.
    pub hours_worked: Option<Decimal>,
}

impl From<TimeEntry> for TimeEntryResponse {
    fn from(entry: TimeEntry) -> Self {
        Self {
            completed: entry.is_completed(),
            hours_worked: entry.hours_worked(),
            entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::PayStubStatus;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = PayrollError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_lifecycle_maps_to_409() {
        let api_error: ApiErrorResponse = PayrollError::InvalidStatusTransition {
            stub_id: Uuid::nil(),
            from: PayStubStatus::Draft,
            to: PayStubStatus::Paid,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "INVALID_STATUS_TRANSITION");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let api_error: ApiErrorResponse = PayrollError::InvalidPeriod {
            start: date,
            end: date.pred_opt().unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
    }

    #[test]
    fn test_config_error_has_details() {
        let api_error: ApiErrorResponse = PayrollError::ConfigNotFound {
            path: "/etc/payroll.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_error.error.details.unwrap().contains("/etc/payroll.yaml"));
    }
}

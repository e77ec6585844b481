//! HTTP request handlers for the payroll API.
//!
//! Every handler tags its work with a `correlation_id` and maps
//! [`PayrollError`] through [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::{EmployeeUpdate, PayStubUpdate, TimeEntry, TimeEntryUpdate};
use crate::processing::{amend_time_entry, record_time_entry};
use crate::store::{EmployeeFilter, PayStubFilter, TimeEntryFilter};

use super::request::{PayRequest, ProcessRequest, TodayQuery, YearQuery};
use super::response::{ApiError, ApiErrorResponse, TimeEntryResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/:id", get(get_employee).patch(update_employee))
        .route("/time-entries", get(list_time_entries).post(create_time_entry))
        .route("/time-entries/:id", patch(update_time_entry))
        .route("/pay-periods", get(list_pay_periods))
        .route("/pay-periods/current", get(current_pay_period))
        .route("/payroll/process", post(process_payroll))
        .route("/pay-stubs", get(list_pay_stubs))
        .route("/pay-stubs/:id", get(get_pay_stub))
        .route("/pay-stubs/:id/finalize", post(finalize_pay_stub))
        .route("/pay-stubs/:id/pay", post(pay_pay_stub))
        .route("/pay-stubs/:id/recalculate", post(recalculate_pay_stub))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn failure(correlation_id: Uuid, error: PayrollError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        kind = ?error.kind(),
        error = %error,
        "Request failed"
    );
    error.into()
}

fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's field-level message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(query)| query).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn parse_stub_id(
    correlation_id: Uuid,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Uuid, ApiErrorResponse> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid pay stub id");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// GET /employees
async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<EmployeeFilter>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let employees = state
        .employees()
        .list(&filter)
        .map_err(|err| failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employees))
}

/// GET /employees/:id
async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .employees()
        .get(&id)
        .map_err(|err| failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employee))
}

/// PATCH /employees/:id
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let update = parse_body(correlation_id, payload)?;
    let employee = state
        .employees()
        .update(&id, update)
        .map_err(|err| failure(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        status = ?employee.status,
        "Employee updated"
    );
    Ok(json_response(StatusCode::OK, employee))
}

/// GET /time-entries
async fn list_time_entries(
    State(state): State<AppState>,
    query: Result<Query<TimeEntryFilter>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let entries: Vec<TimeEntryResponse> = state
        .entries()
        .list(&filter)
        .map_err(|err| failure(correlation_id, err))?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(json_response(StatusCode::OK, entries))
}

/// POST /time-entries
async fn create_time_entry(
    State(state): State<AppState>,
    payload: Result<Json<TimeEntry>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let entry = parse_body(correlation_id, payload)?;
    state
        .employees()
        .get(&entry.employee_id)
        .map_err(|err| failure(correlation_id, err))?;
    let entry = {
        let _ledger = state.lock_ledger();
        record_time_entry(state.entries(), state.stubs(), entry)
    }
    .map_err(|err| failure(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        entry_id = %entry.id,
        employee_id = %entry.employee_id,
        date = %entry.date,
        "Time entry recorded"
    );
    Ok(json_response(
        StatusCode::CREATED,
        TimeEntryResponse::from(entry),
    ))
}

/// PATCH /time-entries/:id
async fn update_time_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TimeEntryUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let update = parse_body(correlation_id, payload)?;
    let entry = {
        let _ledger = state.lock_ledger();
        amend_time_entry(state.entries(), state.stubs(), &id, update)
    }
    .map_err(|err| failure(correlation_id, err))?;
    info!(correlation_id = %correlation_id, entry_id = %entry.id, "Time entry amended");
    Ok(json_response(StatusCode::OK, TimeEntryResponse::from(entry)))
}

/// GET /pay-periods?year=
async fn list_pay_periods(
    State(state): State<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let YearQuery { year } = parse_query(correlation_id, query)?;
    let periods = state.config().calendar().generate_periods(year);
    Ok(json_response(StatusCode::OK, periods))
}

/// GET /pay-periods/current
///
/// Uses the `today` query parameter when given, otherwise the server's UTC
/// date.
async fn current_pay_period(
    State(state): State<AppState>,
    query: Result<Query<TodayQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let TodayQuery { today } = parse_query(correlation_id, query)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let period = state
        .config()
        .calendar()
        .current_period(today)
        .map_err(|err| failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, period))
}

/// POST /payroll/process
///
/// Creates the missing draft stubs for the requested period. Per-employee
/// failures are reported in the body; the status is 200 as long as the run
/// itself could start.
async fn process_payroll(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");
    let request = parse_body(correlation_id, payload)?;

    let outcome = state
        .processor()
        .process(request.period_start, request.period_end)
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        period_start = %request.period_start,
        period_end = %request.period_end,
        created = outcome.created.len(),
        skipped = outcome.skipped.len(),
        errors = outcome.errors.len(),
        "Payroll processing completed"
    );
    Ok(json_response(StatusCode::OK, outcome))
}

/// GET /pay-stubs
async fn list_pay_stubs(
    State(state): State<AppState>,
    query: Result<Query<PayStubFilter>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let stubs = state
        .stubs()
        .list(&filter)
        .map_err(|err| failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, stubs))
}

/// GET /pay-stubs/:id
async fn get_pay_stub(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_stub_id(correlation_id, path)?;
    let stub = state
        .stubs()
        .get(id)
        .map_err(|err| failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, stub))
}

fn transition(
    state: &AppState,
    correlation_id: Uuid,
    id: Uuid,
    update: PayStubUpdate,
) -> HandlerResult {
    let stub = {
        let _ledger = state.lock_ledger();
        state.stubs().update(id, update)
    }
    .map_err(|err| failure(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        stub_id = %stub.id,
        employee_id = %stub.employee_id,
        status = %stub.status,
        "Pay stub status changed"
    );
    Ok(json_response(StatusCode::OK, stub))
}

/// POST /pay-stubs/:id/finalize
async fn finalize_pay_stub(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_stub_id(correlation_id, path)?;
    transition(&state, correlation_id, id, PayStubUpdate::finalize())
}

/// POST /pay-stubs/:id/pay
async fn pay_pay_stub(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_stub_id(correlation_id, path)?;
    let request = parse_body(correlation_id, payload)?;
    transition(&state, correlation_id, id, PayStubUpdate::pay(request.pay_date))
}

/// POST /pay-stubs/:id/recalculate
async fn recalculate_pay_stub(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_stub_id(correlation_id, path)?;
    let stub = state
        .processor()
        .recalculate(id)
        .map_err(|err| failure(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        stub_id = %stub.id,
        gross_pay = %stub.gross_pay,
        "Pay stub recalculated"
    );
    Ok(json_response(StatusCode::OK, stub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
        AppState::in_memory(config)
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_api_001_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payroll/process")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_002_missing_field_is_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payroll/process")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"period_start": "2026-01-12"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_api_003_unknown_employee_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_error(response).await.code, "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_004_bad_stub_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/pay-stubs/not-a-uuid/finalize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_005_inverted_period_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payroll/process")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"period_start": "2026-01-25", "period_end": "2026-01-12"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_PERIOD");
    }
}

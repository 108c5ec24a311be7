//! HTTP request handlers for the leave accounting API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    EmployeeLeaveInput, calculate_payroll, compute_monthly_stats, roster_to_csv, summarize_roster,
};
use crate::error::EngineError;

use super::request::{LeaveStatsRequest, PayrollRequest, RosterSummaryQuery, RosterSummaryRequest};
use super::response::{ApiError, ApiErrorResponse, LeaveStatsResponse, PayrollResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave-stats", post(leave_stats_handler))
        .route("/roster-summary", post(roster_summary_handler))
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Turns a JSON body rejection into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Missing fields and values refused by model validation
            if body_text.contains("missing field") || body_text.contains("Invalid ") {
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

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Turns an engine error into its mapped status and JSON body.
fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /leave-stats endpoint.
///
/// Computes one employee's leave report for the requested month.
async fn leave_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveStatsRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.check_spans(state.config().policy().max_interval_days) {
        return engine_error_response(correlation_id, err);
    }

    let input = match EmployeeLeaveInput::try_from(request.employee) {
        Ok(input) => input,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let holidays = state.holidays_or_configured(request.holidays.as_deref());
    let today = AppState::today_or_now(request.today);
    let report = compute_monthly_stats(
        &input,
        holidays,
        request.month,
        state.config().policy(),
        today,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %input.employee_id,
        month = %request.month,
        total_consumed_days = report.stats.total_consumed_days,
        duration_us = start_time.elapsed().as_micros(),
        "Leave stats completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(LeaveStatsResponse::new(report)),
    )
        .into_response()
}

/// Handler for POST /roster-summary endpoint.
///
/// Returns one stats row per employee as JSON, or as CSV with
/// `?format=csv`.
async fn roster_summary_handler(
    State(state): State<AppState>,
    Query(query): Query<RosterSummaryQuery>,
    payload: Result<Json<RosterSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.check_spans(state.config().policy().max_interval_days) {
        return engine_error_response(correlation_id, err);
    }

    let roster = match request.employee_inputs() {
        Ok(roster) => roster,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let holidays = state.holidays_or_configured(request.holidays.as_deref());
    let today = AppState::today_or_now(request.today);
    let summary = summarize_roster(
        &roster,
        holidays,
        request.month,
        state.config().policy(),
        today,
    );

    info!(
        correlation_id = %correlation_id,
        month = %request.month,
        employees = summary.len(),
        csv = query.wants_csv(),
        "Roster summary completed successfully"
    );

    if !query.wants_csv() {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(summary),
        )
            .into_response();
    }

    match roster_to_csv(&summary) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"leave-summary-{}.csv\"", request.month),
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll endpoint.
///
/// Computes the employee's loss-of-pay deduction and net salary.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.check_spans(state.config().policy().max_interval_days) {
        return engine_error_response(correlation_id, err);
    }

    let input = match EmployeeLeaveInput::try_from(request.employee) {
        Ok(input) => input,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let holidays = state.holidays_or_configured(request.holidays.as_deref());
    let today = AppState::today_or_now(request.today);
    match calculate_payroll(
        &input,
        holidays,
        request.month,
        state.config().policy(),
        today,
        request.base_salary,
        request.working_days_per_month,
    ) {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payroll.employee_id,
                lop_days = payroll.lop_days,
                net_salary = %payroll.net_salary,
                "Payroll completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(PayrollResponse::new(payroll)),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

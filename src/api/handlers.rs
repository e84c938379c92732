//! HTTP request handlers for the pension engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_state_pension_age_with, generate_schedule};
use crate::error::EngineResult;
use crate::models::{CycleLength, NiCode, PensionResult};

use super::request::{PaymentsRequest, SpaRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// # Example
///
/// ```no_run
/// use pension_engine::api::{AppState, create_router};
/// use pension_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/dwp").unwrap();
/// let router = create_router(AppState::new(config));
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payments", post(payments_handler))
        .route("/state-pension-age", post(state_pension_age_handler))
        .with_state(state)
}

/// Handler for POST /payments endpoint.
///
/// Accepts a schedule request and returns the generated payments.
async fn payments_handler(
    State(state): State<AppState>,
    payload: Result<Json<PaymentsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payments request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match build_schedule(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                ni = %result.ni,
                cycle_days = result.cycle_days,
                payments = result.payments.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payment schedule generated"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                ni_code = %request.ni_code,
                error = %err,
                "Payment schedule failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Runs the schedule engine for one request against the loaded grid.
fn build_schedule(state: &AppState, request: &PaymentsRequest) -> EngineResult<PensionResult> {
    let config = state.config();
    let cycle = CycleLength::try_from(request.cycle_days)?;
    let ni: NiCode = request.ni_code.parse()?;
    let holidays = request.holiday_map.as_ref().unwrap_or(config.holidays());

    generate_schedule(
        &ni,
        cycle,
        request.start_year..=request.end_year,
        holidays,
        config.grid(),
    )
}

/// Handler for POST /state-pension-age endpoint.
///
/// Accepts a date of birth and returns the State Pension age.
async fn state_pension_age_handler(
    State(state): State<AppState>,
    payload: Result<Json<SpaRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing State Pension age request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match calculate_state_pension_age_with(&request.dob, state.config().spa_table()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                spa_date = %result.spa_date,
                source = ?result.source,
                "State Pension age calculated"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "State Pension age calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    ApiErrorResponse::bad_request(error).into_response()
}

//! HTTP request handlers for the Payroll Calculation Engine API.
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

use crate::calculation::calculate_payroll;
use crate::error::EngineError;

use super::request::{BatchCalculationRequest, CalculationRequest};
use super::response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, BatchItemResponse, CalculationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the calculated pay result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employee_id = request.employee.id.clone();
    match perform_calculation(&state, request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                gross_pay = %response.result.gross_pay,
                net_pay = %response.result.net_pay,
                cached = response.cached,
                duration_us = response.duration_us,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, &response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, &api_error.error)
        }
    }
}

/// Handler for POST /calculate/batch endpoint.
///
/// Calculates each request independently. A failed item does not fail the
/// batch; its error is reported in place of the result.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let batch = match payload {
        Ok(Json(batch)) => batch,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        requests = batch.requests.len(),
        "Processing batch calculation request"
    );

    let results: Vec<BatchItemResponse> = batch
        .requests
        .into_iter()
        .map(|request| {
            let employee_id = request.employee.id.clone();
            match perform_calculation(&state, request) {
                Ok(response) => BatchItemResponse {
                    employee_id,
                    response: Some(response),
                    error: None,
                },
                Err(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        employee_id = %employee_id,
                        error = %err,
                        "Batch item failed"
                    );
                    let api_error: ApiErrorResponse = err.into();
                    BatchItemResponse {
                        employee_id,
                        response: None,
                        error: Some(api_error.error),
                    }
                }
            }
        })
        .collect();

    let succeeded = results.iter().filter(|r| r.response.is_some()).count();
    let failed = results.len() - succeeded;
    info!(
        correlation_id = %correlation_id,
        succeeded,
        failed,
        "Batch calculation completed"
    );

    json_response(
        StatusCode::OK,
        &BatchCalculationResponse {
            results,
            succeeded,
            failed,
        },
    )
}

/// Runs one calculation, consulting the response memo first.
fn perform_calculation(
    state: &AppState,
    request: CalculationRequest,
) -> Result<CalculationResponse, EngineError> {
    let start_time = Instant::now();

    // The request body is the memo key; results are a pure function of it.
    let cache_key = serde_json::to_string(&request).ok();
    let compute = || -> Result<_, EngineError> {
        let input = request.into_input()?;
        let rules = state.config().rules_for(input.period.end_date)?;
        let mut result = calculate_payroll(
            &input.employee,
            &input.contracts,
            &input.shifts,
            &input.period,
            rules,
        )?;
        if let Some(adjustment) = &input.adjustment {
            result.apply_adjustment(adjustment)?;
        }
        Ok(result)
    };

    let (result, cached) = match cache_key {
        Some(key) => state.cache().get_or_try_insert_with(&key, compute)?,
        None => (compute()?, false),
    };

    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
    Ok(CalculationResponse::new(result, duration_us, cached))
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    json_response(StatusCode::BAD_REQUEST, &error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

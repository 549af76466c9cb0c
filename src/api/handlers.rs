//! HTTP request handlers for the Compensation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dispatch::{self, Operation};
use crate::error::EngineResult;

use super::proxy::{ProxyError, SEVERANCE_PATH};
use super::request::{IncapacityRequest, SeveranceRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/calculate/incapacidad", post(incapacity_handler))
        .route("/calculate/indemnizacion", post(severance_handler))
        .route("/api/calc/indemnizacion", post(proxy_severance_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for POST /calculate/incapacidad.
async fn incapacity_handler(
    State(state): State<AppState>,
    payload: Result<Json<IncapacityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        operation = %Operation::Incapacity,
        "Processing calculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = dispatch::incapacity(request, state.config());
    respond(correlation_id, Operation::Incapacity, start_time, result)
}

/// Handler for POST /calculate/indemnizacion.
async fn severance_handler(payload: Result<Json<SeveranceRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        operation = %Operation::Severance,
        "Processing calculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = dispatch::severance(request);
    respond(correlation_id, Operation::Severance, start_time, result)
}

/// Handler for POST /api/calc/indemnizacion.
///
/// Forwards the body to the configured upstream calculation service.
async fn proxy_severance_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();

    let Some(proxy) = state.proxy() else {
        warn!(correlation_id = %correlation_id, "Proxy request without configured upstream");
        return ProxyError::NotConfigured.into_response();
    };

    info!(
        correlation_id = %correlation_id,
        upstream = %proxy.base_url(),
        "Forwarding severance request"
    );

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Unreadable proxy body");
            return ProxyError::Transport {
                message: err.to_string(),
            }
            .into_response();
        }
    };

    let start_time = Instant::now();
    match proxy.forward(SEVERANCE_PATH, &payload).await {
        Ok(data) => {
            info!(
                correlation_id = %correlation_id,
                duration_us = start_time.elapsed().as_micros(),
                "Upstream request completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(data),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Upstream request failed"
            );
            err.into_response()
        }
    }
}

/// Turns a calculator result into a JSON response, logging the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: Operation,
    start_time: Instant,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                operation = %operation,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation = %operation,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
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
    ApiErrorResponse::bad_request(error).into_response()
}

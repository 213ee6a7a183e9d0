//! HTTP request handlers for the tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::TaxCalculationRequest;

use super::request::{CompareParams, HistoryParams};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/tax/calculate", post(calculate_handler))
        .route("/api/tax/brackets/:year", get(brackets_handler))
        .route("/api/tax/compare", get(compare_handler))
        .route("/api/tax/history/:income", get(history_handler))
        .with_state(state)
}

/// Handler for GET /api/health.
async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(HealthResponse::ok()),
    )
}

/// Handler for POST /api/tax/calculate.
///
/// Accepts a calculation request and returns the liability for one income
/// in one financial year.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxCalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    match state.engine().calculate(&request).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                financial_year = %result.financial_year,
                taxable_income = %result.taxable_income,
                net_tax_payable = %result.net_tax_payable,
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
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /api/tax/brackets/{year}.
///
/// Returns the bracket table for a financial year as a read-only projection
/// of the reference data.
async fn brackets_handler(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year = %year, "Fetching bracket table");

    match state.engine().brackets_for(&year).await {
        Ok(brackets) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(brackets),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year = %year,
                error = %err,
                "Bracket lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /api/tax/compare.
///
/// Compares liability for a fixed income across the requested financial
/// years, in request order.
async fn compare_handler(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let years = params.year_list();
    info!(
        correlation_id = %correlation_id,
        income = %params.income,
        years = ?years,
        "Processing comparison request"
    );

    match state.engine().compare_across_years(params.income, &years).await {
        Ok(results) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(results),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Comparison failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /api/tax/history/{income}.
///
/// Returns liability for the requested income over the most recent known
/// financial years, most recent first.
async fn history_handler(
    State(state): State<AppState>,
    Path(income): Path<Decimal>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        income = %income,
        years = params.years,
        "Processing history request"
    );

    match state.engine().history(income, params.years).await {
        Ok(results) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(results),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "History request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

//! HTTP request handlers for the scheduling engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{OvertimePolicy, aggregate_week};
use crate::error::EngineResult;
use crate::schedule::{clone_week, publish, unpublish};

use super::request::{
    CloneWeekRequest, OvertimeOverride, PublishRequest, SummaryRequest, UnpublishRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summary", post(summary_handler))
        .route("/publish", post(publish_handler))
        .route("/unpublish", post(unpublish_handler))
        .route("/clone", post(clone_handler))
        .with_state(state)
}

/// Converts a JSON extraction rejection into an API error body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
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
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(error: crate::error::EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Operation failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn ok_json<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Resolves the overtime policy for a request: the explicit override if
/// present, the loaded settings otherwise.
fn resolve_policy(
    state: &AppState,
    overtime: Option<OvertimeOverride>,
) -> EngineResult<Option<OvertimePolicy>> {
    match overtime {
        Some(overtime) => Ok(Some(overtime.into_policy()?)),
        None => Ok(state.settings().overtime_policy()),
    }
}

/// Handler for the POST /summary endpoint.
///
/// Computes the week summary for the supplied aggregates without touching
/// any persisted state.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let policy = match resolve_policy(&state, request.overtime) {
        Ok(policy) => policy,
        Err(err) => return engine_error(err, correlation_id),
    };

    let summary = aggregate_week(&request.aggregates, request.projected_sales, policy.as_ref());
    info!(
        correlation_id = %correlation_id,
        total_shifts = summary.total_shifts,
        total_wage = %summary.totals.total_wage,
        "Summary computed"
    );
    ok_json(summary)
}

/// Handler for the POST /publish endpoint.
///
/// Assembles the atomic publish batch, the week-summary snapshot, the
/// notification recipients, and the post-publish local aggregates.
async fn publish_handler(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing publish request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let policy = match resolve_policy(&state, request.overtime) {
        Ok(policy) => policy,
        Err(err) => return engine_error(err, correlation_id),
    };

    let now_ms = Utc::now().timestamp_millis();
    match publish(
        &request.context,
        &request.aggregates,
        request.scope,
        &request.known_employee_ids,
        request.projected_sales,
        policy.as_ref(),
        now_ms,
    ) {
        Ok(plan) => {
            info!(
                correlation_id = %correlation_id,
                week_id = %request.context.week_id,
                mutations = plan.batch.len(),
                recipients = plan.recipients.len(),
                total_wage = %plan.summary.totals.total_wage,
                "Publish plan assembled"
            );
            ok_json(plan)
        }
        Err(err) => engine_error(err, correlation_id),
    }
}

/// Handler for the POST /unpublish endpoint.
async fn unpublish_handler(
    State(_state): State<AppState>,
    payload: Result<Json<UnpublishRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing unpublish request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let now_ms = Utc::now().timestamp_millis();
    match unpublish(&request.context, &request.aggregates, now_ms) {
        Ok(plan) => {
            info!(
                correlation_id = %correlation_id,
                week_id = %request.context.week_id,
                mutations = plan.batch.len(),
                "Unpublish plan assembled"
            );
            ok_json(plan)
        }
        Err(err) => engine_error(err, correlation_id),
    }
}

/// Handler for the POST /clone endpoint.
async fn clone_handler(
    State(_state): State<AppState>,
    payload: Result<Json<CloneWeekRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clone request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let now_ms = Utc::now().timestamp_millis();
    match clone_week(
        &request.context,
        &request.source_week_id,
        &request.employee_ids,
        &request.sources,
        &request.destinations,
        now_ms,
    ) {
        Ok(plan) => {
            info!(
                correlation_id = %correlation_id,
                source_week = %request.source_week_id,
                target_week = %request.context.week_id,
                cloned_shifts = plan.cloned_shifts,
                "Clone plan assembled"
            );
            ok_json(plan)
        }
        Err(err) => engine_error(err, correlation_id),
    }
}

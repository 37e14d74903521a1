//! HTTP request handlers for the shift ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::directory::Directory;
use crate::error::LedgerError;
use crate::models::Actor;

use super::request::{EntryQuery, SubmitEntryRequest};
use super::response::{ApiError, ApiErrorResponse, VerifyResponse};
use super::state::AppState;

/// Header naming the acting user.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/entries", get(list_entries_handler).post(submit_entry_handler))
        .route("/entries/:id", delete(delete_entry_handler))
        .route("/entries/:id/verify", post(verify_entry_handler))
        .route("/summary", get(summary_handler))
        .with_state(state)
}

/// Resolves the acting user from the request headers.
fn resolve_actor(state: &AppState, headers: &HeaderMap) -> Result<Actor, ApiErrorResponse> {
    let actor_id = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty());

    match actor_id {
        Some(id) => state
            .directory()
            .user(id)
            .map(|user| user.actor())
            .ok_or_else(|| {
                ApiErrorResponse::new(StatusCode::UNAUTHORIZED, ApiError::unknown_actor(Some(id)))
            }),
        None => Err(ApiErrorResponse::new(
            StatusCode::UNAUTHORIZED,
            ApiError::unknown_actor(None),
        )),
    }
}

/// Logs a failed ledger call and converts it for the response.
fn ledger_failure(correlation_id: Uuid, error: LedgerError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        kind = ?error.kind(),
        error = %error,
        "Ledger operation failed"
    );
    error.into()
}

fn bad_request(error: ApiError) -> ApiErrorResponse {
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}

fn parse_entry_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiErrorResponse> {
    path.map(|Path(id)| id).map_err(|rejection| {
        bad_request(ApiError::validation_error(format!(
            "Invalid entry id: {}",
            rejection.body_text()
        )))
    })
}

fn entry_query(query: Result<Query<EntryQuery>, QueryRejection>) -> Result<EntryQuery, ApiErrorResponse> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| bad_request(ApiError::validation_error(rejection.body_text())))
}

/// Handler for GET /entries.
///
/// Returns the entries the actor may see, newest first.
async fn list_entries_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<EntryQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers)?;
    let query = entry_query(query)?;

    let entries = state
        .ledger()
        .visible(&actor, &query.filter())
        .map_err(|e| ledger_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        actor_id = %actor.id,
        entries = entries.len(),
        "Listed shift entries"
    );
    Ok((StatusCode::OK, Json(entries)).into_response())
}

/// Handler for POST /entries.
///
/// Validates and stores a new pending entry.
async fn submit_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitEntryRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing entry submission");

    let actor = resolve_actor(&state, &headers)?;

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
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
            return Err(bad_request(error));
        }
    };

    let entry = state
        .ledger()
        .submit(&actor, request.into_submission(&actor))
        .map_err(|e| ledger_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        entry_id = %entry.id(),
        "Entry submission completed"
    );
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// Handler for POST /entries/:id/verify.
async fn verify_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers)?;
    let entry_id = parse_entry_id(path)?;

    let outcome = state
        .ledger()
        .verify(&actor, entry_id)
        .map_err(|e| ledger_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        entry_id = %entry_id,
        outcome = ?outcome,
        "Verification request completed"
    );
    Ok((StatusCode::OK, Json(VerifyResponse { entry_id, outcome })).into_response())
}

/// Handler for DELETE /entries/:id.
async fn delete_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers)?;
    let entry_id = parse_entry_id(path)?;

    state
        .ledger()
        .delete(&actor, entry_id)
        .map_err(|e| ledger_failure(correlation_id, e))?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for GET /summary.
///
/// Returns totals and store standings over the entries the actor may see.
async fn summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<EntryQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers)?;
    let query = entry_query(query)?;

    let report = state
        .ledger()
        .report(
            &actor,
            &query.filter(),
            query.options(),
            state.directory().stores(),
        )
        .map_err(|e| ledger_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        actor_id = %actor.id,
        entries = report.summary.entry_count,
        verified_only = query.verified_only,
        "Summary produced"
    );
    Ok((StatusCode::OK, Json(report)).into_response())
}

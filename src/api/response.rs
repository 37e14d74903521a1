//! Response types for the shift ledger API.
//!
//! This module defines the response bodies and the mapping from
//! [`LedgerError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorKind, LedgerError};
use crate::workflow::VerifyOutcome;

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

    /// Creates an error for a request without a known acting user.
    pub fn unknown_actor(actor_id: Option<&str>) -> Self {
        match actor_id {
            Some(id) => Self::with_details(
                "UNKNOWN_ACTOR",
                format!("Unknown user: {}", id),
                "The x-actor-id header must name a configured user",
            ),
            None => Self::new("UNKNOWN_ACTOR", "Missing x-actor-id header"),
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let status = match error.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Permission => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyVerified => StatusCode::CONFLICT,
            ErrorKind::Persistence => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = error.to_string();
        let error = match error {
            LedgerError::ConfigNotFound { .. } | LedgerError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            LedgerError::Validation { field, .. } => ApiError::with_details(
                "VALIDATION_ERROR",
                message,
                format!("Field '{}' was rejected", field),
            ),
            LedgerError::EntryNotFound { .. } => ApiError::new("ENTRY_NOT_FOUND", message),
            LedgerError::ExpenseNotFound { .. } => ApiError::new("EXPENSE_NOT_FOUND", message),
            LedgerError::PermissionDenied { .. } => ApiError::new("PERMISSION_DENIED", message),
            LedgerError::AlreadyVerified { .. } => ApiError::new("ALREADY_VERIFIED", message),
            LedgerError::Persistence(_) => {
                ApiError::with_details("STORE_UNAVAILABLE", "Entry store failed", message)
            }
        };

        Self { status, error }
    }
}

/// Response body for `POST /entries/:id/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// The targeted entry.
    pub entry_id: Uuid,
    /// Whether the call changed the entry.
    pub outcome: VerifyOutcome,
}

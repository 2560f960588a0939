//! Error types for etude-api
//!
//! Maps store and client errors onto HTTP responses with a JSON error
//! envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use etude_common::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400) caught at the API layer
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Core store or client error
    #[error(transparent)]
    Core(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Core(err) => match err {
                Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
                Error::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg),
                Error::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
                Error::NotInitialized(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOT_INITIALIZED",
                    msg,
                ),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    other.to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

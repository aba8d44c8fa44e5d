//! Application-level HTTP error types.
//!
//! Errors returned from HTTP handlers are converted into JSON responses
//! via `IntoResponse`, so handlers can use `?` and still produce the
//! wire shapes the Retell platform expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Webhook signature did not match the configured secret
    #[error("Invalid signature")]
    InvalidSignature,

    /// Request body could not be parsed
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type for HTTP handlers.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid signature"),
            AppError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "Invalid payload"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_maps_to_401() {
        let response = AppError::InvalidSignature.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn invalid_payload_maps_to_400() {
        let response = AppError::InvalidPayload("not json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

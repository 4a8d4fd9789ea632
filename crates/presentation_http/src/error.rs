//! API error handling
//!
//! Error responses never carry internal details; those go to the log.

use std::any::Any;

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Body returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(path) => (StatusCode::NOT_FOUND, format!("Not found: {path}")),
            Self::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            },
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Turn a handler panic into the generic 500 response
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_is_500() {
        let response = ApiError::Internal("db exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_is_404() {
        let response = ApiError::NotFound("/nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn application_error_maps_to_internal() {
        let err: ApiError = ApplicationError::Internal("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn panic_payload_becomes_500() {
        let response = panic_response(Box::new("bad index"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }
}

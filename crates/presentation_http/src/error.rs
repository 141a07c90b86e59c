//! API error handling
//!
//! Upstream failures surface as 503 without provider details; internal
//! errors never echo their cause.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            Self::BadRequest(msg) => ("bad_request", msg),
            Self::ServiceUnavailable(_) => (
                "service_unavailable",
                "Weather data temporarily unavailable".to_string(),
            ),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error while handling request");
                ("internal_error", "An internal error occurred".to_string())
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            e @ (ApplicationError::Upstream(_)
            | ApplicationError::Generation(_)
            | ApplicationError::RateLimited
            | ApplicationError::Resolution(_)) => Self::ServiceUnavailable(e.to_string()),
            e @ (ApplicationError::Configuration(_) | ApplicationError::Internal(_)) => {
                Self::Internal(e.to_string())
            },
        }
    }
}

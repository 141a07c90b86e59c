//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query could not be resolved
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Provider answered 429
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Map a transport-level reqwest error
    pub(crate) fn from_transport(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }

    /// Map a non-success HTTP status
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimitExceeded
        } else {
            Self::RequestFailed(format!("HTTP {status}"))
        }
    }
}

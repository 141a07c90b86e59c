//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or was rejected
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider rejected the API key
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response parsed but carried no text
    #[error("No content in response")]
    EmptyResponse,

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Engine could not be built from configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Map a transport-level reqwest error, tagging timeouts with the configured bound
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success status and its body
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized(format!("Status {status}")),
            429 => Self::RateLimited,
            _ if status.is_server_error() => Self::ServerError(format!("Status {status}: {body}")),
            _ => Self::RequestFailed(format!("Status {status}: {body}")),
        }
    }

    /// Whether the failure is on the provider side and may clear up by itself
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::RateLimited | Self::ServerError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            InferenceError::from_status(StatusCode::UNAUTHORIZED, ""),
            InferenceError::Unauthorized(_)
        ));
        assert!(matches!(
            InferenceError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            InferenceError::RateLimited
        ));
        assert!(matches!(
            InferenceError::from_status(StatusCode::SERVICE_UNAVAILABLE, "overloaded"),
            InferenceError::ServerError(ref m) if m.contains("overloaded")
        ));
        assert!(matches!(
            InferenceError::from_status(StatusCode::BAD_REQUEST, "bad model"),
            InferenceError::RequestFailed(_)
        ));
    }

    #[test]
    fn transient_classification() {
        assert!(InferenceError::Timeout(30_000).is_transient());
        assert!(InferenceError::RateLimited.is_transient());
        assert!(!InferenceError::Unauthorized("401".to_string()).is_transient());
        assert!(!InferenceError::EmptyResponse.is_transient());
    }

    #[test]
    fn timeout_display() {
        assert_eq!(
            InferenceError::Timeout(30_000).to_string(),
            "Inference timeout after 30000ms"
        );
    }
}

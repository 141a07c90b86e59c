//! Air-quality error types

use thiserror::Error;

/// Errors that can occur when querying an air-quality provider
#[derive(Debug, Error)]
pub enum AirQualityError {
    /// Provider is not configured (missing API key)
    #[error("Air-quality provider not configured: {0}")]
    NotConfigured(String),

    /// Connection to provider failed
    #[error("Air-quality connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed with a non-success status
    #[error("Air-quality request failed: {0}")]
    RequestFailed(String),

    /// Provider answered but reported a failure in its payload
    #[error("Air-quality provider returned status '{0}'")]
    ProviderStatus(String),

    /// Response carried no measurement
    #[error("Air-quality response contained no data")]
    NoData,

    /// Failed to parse response
    #[error("Air-quality parse error: {0}")]
    ParseError(String),

    /// Provider is rate limiting us
    #[error("Air-quality rate limit exceeded")]
    RateLimitExceeded,

    /// Server-side failure
    #[error("Air-quality service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Air-quality request timed out")]
    Timeout,
}

impl AirQualityError {
    pub(crate) fn from_transport(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimitExceeded
        } else if status.is_server_error() {
            Self::ServiceUnavailable(format!("HTTP {status}"))
        } else {
            Self::RequestFailed(format!("HTTP {status}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            AirQualityError::from_status(StatusCode::TOO_MANY_REQUESTS),
            AirQualityError::RateLimitExceeded
        ));
        assert!(matches!(
            AirQualityError::from_status(StatusCode::BAD_GATEWAY),
            AirQualityError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            AirQualityError::from_status(StatusCode::UNAUTHORIZED),
            AirQualityError::RequestFailed(_)
        ));
    }

    #[test]
    fn display_keeps_provider_status() {
        let err = AirQualityError::ProviderStatus("fail".to_string());
        assert_eq!(err.to_string(), "Air-quality provider returned status 'fail'");
    }
}

//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Geocoding exhausted every provider
    #[error("Location resolution failed: {0}")]
    Resolution(String),

    /// Weather or air-quality provider failed
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// Text generation failed
    #[error("Message generation failed: {0}")]
    Generation(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Upstream(_))
    }

    /// Whether the failure came from an external service
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream(_) | Self::Generation(_) | Self::RateLimited | Self::Resolution(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::Upstream("503".to_string()).is_retryable());
        assert!(!ApplicationError::Generation("401".to_string()).is_retryable());
        assert!(!ApplicationError::Internal("bug".to_string()).is_retryable());
    }

    #[test]
    fn upstream_classification() {
        assert!(ApplicationError::Generation("timeout".to_string()).is_upstream());
        assert!(!ApplicationError::Configuration("missing key".to_string()).is_upstream());
        assert!(
            !ApplicationError::Domain(DomainError::ValidationError("x".to_string())).is_upstream()
        );
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::ValidationError("City is empty".to_string()).into();
        assert_eq!(err.to_string(), DomainError::ValidationError("City is empty".to_string()).to_string());
    }
}

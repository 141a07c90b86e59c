//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Unknown unit system name
    #[error("Invalid unit system: {0} (expected 'metric' or 'imperial')")]
    InvalidUnitSystem(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create an invalid coordinates error
    pub const fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
        }
    }
}

//! Weather service port

use async_trait::async_trait;
use domain::{GeoLocation, UnitSystem, WeatherObservation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for current-conditions retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Current observation at a location, in the requested units
    ///
    /// Local time, sunrise and sunset carry the provider-reported UTC offset.
    async fn fetch_observation(
        &self,
        location: &GeoLocation,
        units: UnitSystem,
    ) -> Result<WeatherObservation, ApplicationError>;
}

//! Air-quality port

use async_trait::async_trait;
use domain::{AqiReading, AqiSource, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// One air-quality provider
///
/// Implementations normalize their native payload into an [`AqiReading`]
/// tagged with the provider's scale before returning.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Which slot of the fallback this provider fills
    fn source(&self) -> AqiSource;

    async fn current_reading(&self, location: &GeoLocation)
    -> Result<AqiReading, ApplicationError>;
}

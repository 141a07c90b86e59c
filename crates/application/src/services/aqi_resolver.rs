//! Air-quality fallback
//!
//! The primary provider answers on the US AQI scale and the secondary one on
//! a 1-5 index. Either may be unconfigured; neither failure is fatal.

use std::{fmt, sync::Arc};

use domain::{AqiReading, GeoLocation};
use tracing::{debug, instrument, warn};

use crate::ports::AirQualityPort;

/// Picks the first provider that returns a reading
pub struct AqiResolver {
    primary: Option<Arc<dyn AirQualityPort>>,
    secondary: Option<Arc<dyn AirQualityPort>>,
}

impl fmt::Debug for AqiResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AqiResolver")
            .field("primary", &self.primary.is_some())
            .field("secondary", &self.secondary.is_some())
            .finish()
    }
}

impl AqiResolver {
    /// Providers left out (`None`) are skipped
    pub fn new(
        primary: Option<Arc<dyn AirQualityPort>>,
        secondary: Option<Arc<dyn AirQualityPort>>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Resolver with no providers; every lookup yields `None`
    pub const fn disabled() -> Self {
        Self {
            primary: None,
            secondary: None,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }

    /// Reading for `location`, or `None` when no provider has one
    #[instrument(skip(self), fields(lat = %location.latitude(), lon = %location.longitude()))]
    pub async fn resolve(&self, location: &GeoLocation) -> Option<AqiReading> {
        for provider in [&self.primary, &self.secondary].into_iter().flatten() {
            match provider.current_reading(location).await {
                Ok(reading) => {
                    debug!(
                        source = %provider.source(),
                        value = reading.value(),
                        "Air quality resolved"
                    );
                    return Some(reading);
                },
                Err(e) => {
                    warn!(
                        source = %provider.source(),
                        lat = %location.latitude(),
                        lon = %location.longitude(),
                        error = %e,
                        "Air quality provider failed"
                    );
                },
            }
        }

        debug!("No air quality data available");
        None
    }
}

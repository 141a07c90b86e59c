//! Air-quality adapters - Implement AirQualityPort using integration_air_quality
//!
//! Each provider's native payload is normalized into an [`AqiReading`]
//! tagged with its own scale right here, so nothing downstream ever sees a
//! provider shape.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::AirQualityPort;
use async_trait::async_trait;
use domain::{
    AqiReading, AqiSource, GeoLocation, MICROGRAMS_PER_CUBIC_METRE, Pollutant, PollutantLevel,
};
use integration_air_quality::{
    AirQualityConfig, AirQualityError, IqAirClient, IqAirHttpClient, IqAirPollution,
    OpenWeatherMapClient, OpenWeatherMapHttpClient, OwmAirPollution,
};
use tracing::{debug, instrument};

/// Map integration air-quality error to application error
fn map_error(err: AirQualityError) -> ApplicationError {
    match err {
        AirQualityError::NotConfigured(msg) => ApplicationError::Configuration(msg),
        AirQualityError::RateLimitExceeded => ApplicationError::RateLimited,
        AirQualityError::ConnectionFailed(_)
        | AirQualityError::RequestFailed(_)
        | AirQualityError::ProviderStatus(_)
        | AirQualityError::NoData
        | AirQualityError::ParseError(_)
        | AirQualityError::ServiceUnavailable(_)
        | AirQualityError::Timeout => ApplicationError::Upstream(format!("air quality: {err}")),
    }
}

// ============================================================================
// Primary provider (IQAir, US AQI)
// ============================================================================

pub struct IqAirAdapter {
    client: Arc<dyn IqAirClient>,
}

impl std::fmt::Debug for IqAirAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IqAirAdapter").finish_non_exhaustive()
    }
}

impl IqAirAdapter {
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] without an IQAir key.
    pub fn new(config: &AirQualityConfig) -> Result<Self, ApplicationError> {
        let client = IqAirHttpClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn IqAirClient>) -> Self {
        Self { client }
    }

    /// US AQI with the dominant pollutant's concentration in its native unit
    fn normalize(pollution: &IqAirPollution) -> AqiReading {
        let code = pollution.main_pollutant.trim();
        let dominant = (!code.is_empty()).then(|| {
            let pollutant = Pollutant::from_code(code);
            let unit = pollutant.primary_unit();
            PollutantLevel::new(pollutant, pollution.concentration(code), unit)
        });

        AqiReading::primary(pollution.aqi_us, dominant, pollution.p2, pollution.p1)
    }
}

#[async_trait]
impl AirQualityPort for IqAirAdapter {
    fn source(&self) -> AqiSource {
        AqiSource::PrimaryProvider
    }

    #[instrument(skip(self), fields(provider = "iqair", lat = location.latitude(), lon = location.longitude()))]
    async fn current_reading(
        &self,
        location: &GeoLocation,
    ) -> Result<AqiReading, ApplicationError> {
        let pollution = self
            .client
            .nearest_city(location.latitude(), location.longitude())
            .await
            .map_err(map_error)?;

        debug!(aqi = pollution.aqi_us, main = %pollution.main_pollutant, "IQAir reading");
        Ok(Self::normalize(&pollution))
    }
}

// ============================================================================
// Secondary provider (OpenWeatherMap, 1-5 index)
// ============================================================================

pub struct OpenWeatherMapAdapter {
    client: Arc<dyn OpenWeatherMapClient>,
}

impl std::fmt::Debug for OpenWeatherMapAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapAdapter").finish_non_exhaustive()
    }
}

impl OpenWeatherMapAdapter {
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] without an OpenWeatherMap key.
    pub fn new(config: &AirQualityConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapHttpClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn OpenWeatherMapClient>) -> Self {
        Self { client }
    }

    fn normalize(pollution: &OwmAirPollution) -> AqiReading {
        let c = &pollution.components;
        let components = [
            (Pollutant::CarbonMonoxide, c.co),
            (Pollutant::NitrogenDioxide, c.no2),
            (Pollutant::Ozone, c.o3),
            (Pollutant::SulfurDioxide, c.so2),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some())
        .map(|(pollutant, value)| PollutantLevel::new(pollutant, value, MICROGRAMS_PER_CUBIC_METRE))
        .collect();

        AqiReading::secondary(pollution.index, c.pm2_5, c.pm10, components)
    }
}

#[async_trait]
impl AirQualityPort for OpenWeatherMapAdapter {
    fn source(&self) -> AqiSource {
        AqiSource::SecondaryProvider
    }

    #[instrument(skip(self), fields(provider = "openweathermap", lat = location.latitude(), lon = location.longitude()))]
    async fn current_reading(
        &self,
        location: &GeoLocation,
    ) -> Result<AqiReading, ApplicationError> {
        let pollution = self
            .client
            .air_pollution(location.latitude(), location.longitude())
            .await
            .map_err(map_error)?;

        debug!(index = pollution.index, "OpenWeatherMap reading");
        Ok(Self::normalize(&pollution))
    }
}

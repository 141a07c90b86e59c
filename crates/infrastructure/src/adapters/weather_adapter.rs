//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{
    DomainError, GeoLocation, Humidity, Precipitation, UnitSystem, WeatherCondition,
    WeatherObservation,
};
use integration_weather::{
    CurrentConditions, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument, warn};

/// Open-Meteo snowfall is reported in centimetres
const MM_PER_CM: f64 = 10.0;

/// Adapter for the Open-Meteo forecast API
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::InvalidCoordinates => ApplicationError::Domain(
                DomainError::ValidationError("Invalid coordinates".to_string()),
            ),
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::ParseError(_)
            | WeatherError::Timeout => ApplicationError::Upstream(format!("weather: {err}")),
        }
    }

    /// Normalize provider conditions into a provisional observation
    fn to_observation(current: CurrentConditions) -> WeatherObservation {
        if !current.local_time_parsed {
            warn!(
                offset_seconds = current.utc_offset_seconds,
                "Provider local time unparseable, using current time at reported offset"
            );
        }
        if !(0.0..=100.0).contains(&current.humidity_pct) {
            warn!(humidity = current.humidity_pct, "Humidity out of range, clamping");
        }

        WeatherObservation {
            observed_at: current.local_time,
            timezone_name: current.timezone,
            condition: WeatherCondition::from_code(current.weather_code),
            temperature: current.temperature,
            feels_like: current.apparent_temperature,
            humidity: Humidity::from_reading(current.humidity_pct),
            pressure_hpa: current.pressure_msl,
            wind_speed: current.wind_speed,
            wind_direction_deg: current.wind_direction.rem_euclid(360.0),
            cloud_cover_pct: cloud_cover(current.cloud_cover_pct),
            visibility_m: current.visibility_m,
            precipitation: Precipitation {
                rain_1h: current.rain_mm,
                rain_3h: None,
                snow_1h: current.snowfall_cm.map(|cm| cm * MM_PER_CM),
                snow_3h: None,
            },
            sunrise: current.sunrise,
            sunset: current.sunset,
            units: current.units,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cloud_cover(pct: f64) -> u8 {
    if pct.is_nan() {
        return 0;
    }
    pct.round().clamp(0.0, 100.0) as u8
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), %units))]
    async fn fetch_observation(
        &self,
        location: &GeoLocation,
        units: UnitSystem,
    ) -> Result<WeatherObservation, ApplicationError> {
        let current = self
            .client
            .get_current(location.latitude(), location.longitude(), units)
            .await
            .map_err(|e| {
                warn!(provider = "open-meteo", error = %e, "Weather fetch failed");
                Self::map_error(e)
            })?;

        debug!(summary = %current.summary(), "Retrieved current weather");
        Ok(Self::to_observation(current))
    }
}

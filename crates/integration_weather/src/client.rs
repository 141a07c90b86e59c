//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast API.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use domain::UnitSystem;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    ApiResponse, CurrentConditions, CurrentData, DailyData, temperature_unit_param,
    wind_speed_unit_param,
};

/// Variables requested in the `current` block
const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                                 precipitation,rain,snowfall,weather_code,cloud_cover,\
                                 pressure_msl,wind_speed_10m,wind_direction_10m,visibility,is_day";

/// Variables requested in the `daily` block
const DAILY_VARIABLES: &str = "sunrise,sunset";

/// Naive local-time layouts tried after RFC 3339, in order
const LOCAL_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::ConnectionFailed(e.to_string())
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching current conditions
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a location in the given unit system
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    /// Parse a provider local-time string and attach the location's offset
    ///
    /// The wall-clock fields are kept as-is; any offset inside an RFC 3339
    /// string is replaced by `offset`.
    pub fn parse_local_time(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let naive = DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| {
                LOCAL_TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            })?;

        offset.from_local_datetime(&naive).single()
    }

    fn offset_from_seconds(seconds: i32) -> FixedOffset {
        FixedOffset::east_opt(seconds).unwrap_or_else(|| {
            warn!(utc_offset_seconds = seconds, "Out-of-range UTC offset, using UTC");
            Utc.fix()
        })
    }

    fn sun_time(values: &[String], offset: FixedOffset, which: &str) -> Option<DateTime<FixedOffset>> {
        let raw = values.first()?;
        let parsed = Self::parse_local_time(raw, offset);
        if parsed.is_none() {
            warn!(value = %raw, field = which, "Unparseable sun time, omitting");
        }
        parsed
    }

    /// Convert the wire response into current conditions
    fn parse_conditions(
        current: CurrentData,
        daily: Option<&DailyData>,
        utc_offset_seconds: i32,
        timezone: Option<String>,
        timezone_abbreviation: Option<String>,
        units: UnitSystem,
    ) -> CurrentConditions {
        let offset = Self::offset_from_seconds(utc_offset_seconds);

        let (local_time, local_time_parsed) = match Self::parse_local_time(&current.time, offset) {
            Some(t) => (t, true),
            None => {
                warn!(
                    value = %current.time,
                    "Unparseable local time, falling back to current time in location offset"
                );
                (Utc::now().with_timezone(&offset), false)
            },
        };

        let (sunrise, sunset) = daily.map_or((None, None), |d| {
            (
                Self::sun_time(&d.sunrise, offset, "sunrise"),
                Self::sun_time(&d.sunset, offset, "sunset"),
            )
        });

        CurrentConditions {
            local_time,
            local_time_parsed,
            utc_offset_seconds,
            timezone,
            timezone_abbreviation,
            weather_code: current.weather_code,
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            humidity_pct: current.relative_humidity_2m,
            pressure_msl: current.pressure_msl,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            cloud_cover_pct: current.cloud_cover,
            visibility_m: current.visibility,
            precipitation_mm: current.precipitation,
            rain_mm: current.rain,
            snowfall_cm: current.snowfall,
            is_day: current.is_day.map(|v| v != 0),
            sunrise,
            sunset,
            units,
        }
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, units = %units))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.forecast_url();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_VARIABLES.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("forecast_days", "1".to_string()),
                ("temperature_unit", temperature_unit_param(units).to_string()),
                ("wind_speed_unit", wind_speed_unit_param(units).to_string()),
                ("precipitation_unit", "mm".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current_data = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let conditions = Self::parse_conditions(
            current_data,
            api_response.daily.as_ref(),
            api_response.utc_offset_seconds,
            api_response.timezone,
            api_response.timezone_abbreviation,
            units,
        );
        debug!(summary = %conditions.summary(), "Received current weather");

        Ok(conditions)
    }
}

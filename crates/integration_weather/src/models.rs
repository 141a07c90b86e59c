//! Weather data models
//!
//! Wire types for the Open-Meteo forecast endpoint and the parsed
//! [`CurrentConditions`] handed to callers.

use chrono::{DateTime, FixedOffset};
use domain::UnitSystem;
use serde::{Deserialize, Serialize};

/// Top-level forecast response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// `current` block, one value per requested variable
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub precipitation: Option<f64>,
    pub rain: Option<f64>,
    pub snowfall: Option<f64>,
    pub weather_code: i32,
    #[serde(default)]
    pub cloud_cover: f64,
    pub pressure_msl: Option<f64>,
    pub wind_speed_10m: f64,
    #[serde(default)]
    pub wind_direction_10m: f64,
    pub visibility: Option<f64>,
    pub is_day: Option<u8>,
}

/// `daily` block, arrays indexed by day
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DailyData {
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
}

/// Current conditions at a location, in the requested units
///
/// All timestamps carry the provider-reported UTC offset of the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local observation time
    pub local_time: DateTime<FixedOffset>,
    /// False when the provider's time string was unparseable and "now" was substituted
    pub local_time_parsed: bool,
    pub utc_offset_seconds: i32,
    /// IANA zone name, e.g. `America/New_York`
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    /// WMO weather code
    pub weather_code: i32,
    pub temperature: f64,
    pub apparent_temperature: f64,
    /// Relative humidity as reported (0-100)
    pub humidity_pct: f64,
    /// Mean sea level pressure in hPa
    pub pressure_msl: Option<f64>,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub cloud_cover_pct: f64,
    /// Visibility in metres
    pub visibility_m: Option<f64>,
    /// Total precipitation over the preceding hour (mm)
    pub precipitation_mm: Option<f64>,
    /// Rain over the preceding hour (mm)
    pub rain_mm: Option<f64>,
    /// Snowfall over the preceding hour (cm)
    pub snowfall_cm: Option<f64>,
    pub is_day: Option<bool>,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    pub units: UnitSystem,
}

impl CurrentConditions {
    /// Short one-line summary for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "code {} {:.1}{} {:.0}%",
            self.weather_code,
            self.temperature,
            self.units.temperature_symbol(),
            self.humidity_pct
        )
    }
}

/// Query value for `temperature_unit`
pub(crate) const fn temperature_unit_param(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Metric => "celsius",
        UnitSystem::Imperial => "fahrenheit",
    }
}

/// Query value for `wind_speed_unit`
pub(crate) const fn wind_speed_unit_param(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Metric => "kmh",
        UnitSystem::Imperial => "mph",
    }
}

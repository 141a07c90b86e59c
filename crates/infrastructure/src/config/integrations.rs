//! Provider configurations: air quality and telemetry.
//!
//! Weather and geocoding carry no secrets and use their client configs
//! directly.

use std::path::PathBuf;

use integration_air_quality::AirQualityConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Air Quality Configuration
// ==============================

/// Air-quality providers; a missing key disables that provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityAppConfig {
    /// IQAir key (primary provider)
    #[serde(default, skip_serializing)]
    pub iqair_api_key: Option<SecretString>,

    /// OpenWeatherMap key (secondary provider)
    #[serde(default, skip_serializing)]
    pub openweathermap_api_key: Option<SecretString>,

    #[serde(default = "default_iqair_base_url")]
    pub iqair_base_url: String,

    #[serde(default = "default_openweathermap_base_url")]
    pub openweathermap_base_url: String,

    #[serde(default = "default_air_quality_timeout")]
    pub timeout_secs: u64,
}

fn default_iqair_base_url() -> String {
    "https://api.airvisual.com".to_string()
}

fn default_openweathermap_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_air_quality_timeout() -> u64 {
    10
}

impl Default for AirQualityAppConfig {
    fn default() -> Self {
        Self {
            iqair_api_key: None,
            openweathermap_api_key: None,
            iqair_base_url: default_iqair_base_url(),
            openweathermap_base_url: default_openweathermap_base_url(),
            timeout_secs: default_air_quality_timeout(),
        }
    }
}

fn exposed(key: Option<&SecretString>) -> Option<String> {
    key.map(|k| k.expose_secret().trim().to_string())
        .filter(|k| !k.is_empty())
}

impl AirQualityAppConfig {
    /// Client configuration with the keys exposed
    #[must_use]
    pub fn to_client_config(&self) -> AirQualityConfig {
        AirQualityConfig {
            iqair_api_key: exposed(self.iqair_api_key.as_ref()),
            openweathermap_api_key: exposed(self.openweathermap_api_key.as_ref()),
            iqair_base_url: self.iqair_base_url.clone(),
            openweathermap_base_url: self.openweathermap_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Telemetry Configuration
// ==============================

/// Log filtering and the optional file sink
///
/// `RUST_LOG` takes precedence over `log_filter` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Also append plain-text logs to `log_file`
    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_log_filter() -> String {
    "weather_agent=info,tower_http=info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("weather.log")
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_to_file: false,
            log_file: default_log_file(),
        }
    }
}

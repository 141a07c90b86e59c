//! Air-quality configuration

use serde::{Deserialize, Serialize};

/// Air-quality provider settings
///
/// A provider without an API key is skipped entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityConfig {
    /// IQAir (AirVisual) API key
    #[serde(default)]
    pub iqair_api_key: Option<String>,

    /// OpenWeatherMap API key
    #[serde(default)]
    pub openweathermap_api_key: Option<String>,

    /// IQAir API base URL
    #[serde(default = "default_iqair_base_url")]
    pub iqair_base_url: String,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_openweathermap_base_url")]
    pub openweathermap_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_iqair_base_url() -> String {
    "https://api.airvisual.com".to_string()
}

fn default_openweathermap_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for AirQualityConfig {
    fn default() -> Self {
        Self {
            iqair_api_key: None,
            openweathermap_api_key: None,
            iqair_base_url: default_iqair_base_url(),
            openweathermap_base_url: default_openweathermap_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AirQualityConfig {
    /// Both providers keyed and pointed at one mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            iqair_api_key: Some("test-iqair-key".to_string()),
            openweathermap_api_key: Some("test-owm-key".to_string()),
            iqair_base_url: base_url.to_string(),
            openweathermap_base_url: base_url.to_string(),
            timeout_secs: 2,
        }
    }

    /// Whether the IQAir provider can be used
    #[must_use]
    pub fn iqair_enabled(&self) -> bool {
        has_key(self.iqair_api_key.as_deref())
    }

    /// Whether the OpenWeatherMap provider can be used
    #[must_use]
    pub fn openweathermap_enabled(&self) -> bool {
        has_key(self.openweathermap_api_key.as_deref())
    }
}

fn has_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| !k.trim().is_empty())
}

//! Geocoding configuration

use serde::{Deserialize, Serialize};

/// Endpoints and limits shared by all geocoding clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Open-Meteo geocoding API base URL
    #[serde(default = "default_forward_base_url")]
    pub forward_base_url: String,

    /// BigDataCloud API base URL
    #[serde(default = "default_bigdatacloud_base_url")]
    pub bigdatacloud_base_url: String,

    /// Nominatim API base URL
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent to every provider (Nominatim requires one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Forward lookup cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
}

fn default_forward_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_bigdatacloud_base_url() -> String {
    "https://api.bigdatacloud.net".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("WeatherAgent/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            forward_base_url: default_forward_base_url(),
            bigdatacloud_base_url: default_bigdatacloud_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            cache_ttl_hours: default_cache_ttl_hours(),
        }
    }
}

impl GeocodingConfig {
    /// Configuration pointing every provider at one mock server, caching off
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            forward_base_url: base_url.to_string(),
            bigdatacloud_base_url: base_url.to_string(),
            nominatim_base_url: base_url.to_string(),
            timeout_secs: 2,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }
}

//! Reverse geocoding clients
//!
//! Two independent providers that turn coordinates into a city name:
//! BigDataCloud (keyless client endpoint) and Nominatim (OpenStreetMap).
//! Callers chain them; each client only reports what its provider said.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::{
    BigDataCloudResponse, NominatimReverseResponse, ReverseMatch, normalize_country_code,
};

/// Minimum spacing between Nominatim requests (usage policy: 1 req/s)
const NOMINATIM_MIN_INTERVAL: Duration = Duration::from_millis(1100);

/// Coordinates → place name lookup
#[async_trait]
pub trait ReverseGeocodingClient: Send + Sync {
    /// Provider name used in logs
    fn provider_name(&self) -> &'static str;

    /// Resolve coordinates to a place name
    async fn reverse(&self, latitude: f64, longitude: f64)
    -> Result<ReverseMatch, GeocodingError>;
}

fn build_client(config: &GeocodingConfig) -> Result<Client, GeocodingError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))
}

fn coordinates_label(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6},{longitude:.6}")
}

// ============================================================================
// BigDataCloud
// ============================================================================

/// BigDataCloud reverse geocoding client
#[derive(Debug)]
pub struct BigDataCloudClient {
    client: Client,
    base_url: String,
}

impl BigDataCloudClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.bigdatacloud_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReverseGeocodingClient for BigDataCloudClient {
    fn provider_name(&self) -> &'static str {
        "bigdatacloud"
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseMatch, GeocodingError> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);
        debug!(url = %url, "Reverse geocoding via BigDataCloud");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", format!("{latitude:.6}")),
                ("longitude", format!("{longitude:.6}")),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::from_transport(&e))?;

        if !response.status().is_success() {
            return Err(GeocodingError::from_status(response.status()));
        }

        let body: BigDataCloudResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let name = body
            .best_name()
            .ok_or_else(|| GeocodingError::NotFound(coordinates_label(latitude, longitude)))?;

        Ok(ReverseMatch {
            name: name.to_string(),
            country_code: normalize_country_code(&body.country_code),
        })
    }
}

// ============================================================================
// Nominatim
// ============================================================================

/// Nominatim reverse geocoding client with request spacing
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.nominatim_base_url.trim_end_matches('/').to_string(),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < NOMINATIM_MIN_INTERVAL {
                let wait = NOMINATIM_MIN_INTERVAL.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting Nominatim request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl ReverseGeocodingClient for NominatimClient {
    fn provider_name(&self) -> &'static str {
        "nominatim"
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseMatch, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/reverse", self.base_url);
        debug!(url = %url, "Reverse geocoding via Nominatim");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", format!("{latitude:.6}")),
                ("lon", format!("{longitude:.6}")),
                ("zoom", "10".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::from_transport(&e))?;

        if !response.status().is_success() {
            return Err(GeocodingError::from_status(response.status()));
        }

        let body: NominatimReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let name = body
            .address
            .best_name()
            .ok_or_else(|| GeocodingError::NotFound(coordinates_label(latitude, longitude)))?;

        Ok(ReverseMatch {
            name: name.to_string(),
            country_code: body
                .address
                .country_code
                .as_deref()
                .and_then(normalize_country_code),
        })
    }
}

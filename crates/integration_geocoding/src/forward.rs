//! Open-Meteo forward geocoding client
//!
//! Resolves a place name (optionally constrained to a country) to
//! coordinates via the [Open-Meteo geocoding API](https://open-meteo.com/en/docs/geocoding-api).
//! Successful lookups are cached; place names rarely move.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::{ForwardMatch, OpenMeteoSearchResponse, normalize_country_code};

/// Name → coordinates lookup
#[async_trait]
pub trait ForwardGeocodingClient: Send + Sync {
    /// Resolve a place name to its best match
    async fn search(
        &self,
        name: &str,
        country_code: Option<&str>,
    ) -> Result<ForwardMatch, GeocodingError>;
}

/// Open-Meteo geocoding client with result caching
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    base_url: String,
    cache: Option<Cache<String, ForwardMatch>>,
}

impl OpenMeteoGeocodingClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            base_url: config.forward_base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn cache_key(name: &str, country_code: Option<&str>) -> String {
        format!(
            "{}|{}",
            name.to_lowercase(),
            country_code.unwrap_or_default().to_lowercase()
        )
    }

    async fn cached(&self, key: &str) -> Option<ForwardMatch> {
        match &self.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Country filter sent upstream; `UK` is not an ISO code, `GB` is
    fn country_filter(country_code: Option<&str>) -> Option<String> {
        let code = normalize_country_code(country_code?)?;
        Some(if code == "UK" { "GB".to_string() } else { code })
    }
}

#[async_trait]
impl ForwardGeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self), fields(provider = "open-meteo"))]
    async fn search(
        &self,
        name: &str,
        country_code: Option<&str>,
    ) -> Result<ForwardMatch, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::NotFound(
                "Place name must not be empty".to_string(),
            ));
        }

        let cache_key = Self::cache_key(name, country_code);
        if let Some(hit) = self.cached(&cache_key).await {
            debug!(%name, "Geocoding cache hit");
            return Ok(hit);
        }

        let url = format!("{}/search", self.base_url);
        let mut params = vec![
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        if let Some(code) = Self::country_filter(country_code) {
            params.push(("countryCode", code));
        }

        debug!(url = %url, %name, "Forward geocoding");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_transport(&e))?;

        if !response.status().is_success() {
            return Err(GeocodingError::from_status(response.status()));
        }

        let body: OpenMeteoSearchResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let place = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::NotFound(name.to_string()))?;

        let location = GeoLocation::new(place.latitude, place.longitude)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let result = ForwardMatch {
            name: place.name,
            country_code: place.country_code.as_deref().and_then(normalize_country_code),
            location,
        };

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, result.clone()).await;
        }
        debug!(name = %result.name, location = %result.location, "Forward geocoded");

        Ok(result)
    }
}

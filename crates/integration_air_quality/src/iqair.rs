//! IQAir (AirVisual) client
//!
//! Queries the `nearest_city` endpoint, which reports the U.S. AQI and the
//! dominant pollutant of the monitoring station closest to the coordinates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use tracing::{debug, instrument};

use crate::config::AirQualityConfig;
use crate::error::AirQualityError;
use crate::models::{IqAirPollution, IqAirResponse};

/// Primary air-quality provider
#[async_trait]
pub trait IqAirClient: Send + Sync {
    /// Pollution readings of the station nearest to the coordinates
    async fn nearest_city(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<IqAirPollution, AirQualityError>;
}

/// HTTP implementation of [`IqAirClient`]
pub struct IqAirHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for IqAirHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IqAirHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IqAirHttpClient {
    /// Create a new IQAir client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be created.
    pub fn new(config: &AirQualityConfig) -> Result<Self, AirQualityError> {
        let api_key = config
            .iqair_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AirQualityError::NotConfigured("IQAir API key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AirQualityError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.iqair_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IqAirClient for IqAirHttpClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, provider = "iqair"))]
    async fn nearest_city(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<IqAirPollution, AirQualityError> {
        let url = format!("{}/v2/nearest_city", self.base_url);
        debug!(url = %url, "Fetching IQAir nearest city");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .query(&[
                ("lat", format!("{latitude:.6}")),
                ("lon", format!("{longitude:.6}")),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AirQualityError::from_transport(&e))?;

        if !response.status().is_success() {
            return Err(AirQualityError::from_status(response.status()));
        }

        let body: IqAirResponse = response
            .json()
            .await
            .map_err(|e| AirQualityError::ParseError(e.to_string()))?;

        if body.status != "success" {
            return Err(AirQualityError::ProviderStatus(body.status));
        }

        let pollution = body.data.ok_or(AirQualityError::NoData)?.current.pollution;
        debug!(aqi_us = pollution.aqi_us, main = %pollution.main_pollutant, "IQAir reading");

        Ok(pollution)
    }
}

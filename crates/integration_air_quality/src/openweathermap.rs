//! OpenWeatherMap air-pollution client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::AirQualityConfig;
use crate::error::AirQualityError;
use crate::models::{OwmAirPollution, OwmResponse};

/// Secondary air-quality provider
#[async_trait]
pub trait OpenWeatherMapClient: Send + Sync {
    /// Current air pollution at the coordinates
    async fn air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OwmAirPollution, AirQualityError>;
}

/// HTTP implementation of [`OpenWeatherMapClient`]
pub struct OpenWeatherMapHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenWeatherMapHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapHttpClient {
    /// Create a new OpenWeatherMap client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be created.
    pub fn new(config: &AirQualityConfig) -> Result<Self, AirQualityError> {
        let api_key = config
            .openweathermap_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AirQualityError::NotConfigured("OpenWeatherMap API key is required".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AirQualityError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config
                .openweathermap_base_url
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl OpenWeatherMapClient for OpenWeatherMapHttpClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, provider = "openweathermap"))]
    async fn air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OwmAirPollution, AirQualityError> {
        let url = format!("{}/data/2.5/air_pollution", self.base_url);
        debug!(url = %url, "Fetching OpenWeatherMap air pollution");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", format!("{latitude:.6}")),
                ("lon", format!("{longitude:.6}")),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AirQualityError::from_transport(&e))?;

        if !response.status().is_success() {
            return Err(AirQualityError::from_status(response.status()));
        }

        let body: OwmResponse = response
            .json()
            .await
            .map_err(|e| AirQualityError::ParseError(e.to_string()))?;

        let entry = body.list.into_iter().next().ok_or(AirQualityError::NoData)?;
        debug!(index = entry.main.aqi, "OpenWeatherMap reading");

        Ok(OwmAirPollution {
            index: entry.main.aqi,
            components: entry.components,
        })
    }
}

//! Geocoding adapters - Implement the geocoding ports using integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    ForwardGeocodingPort, GeocodedPlace, PlaceQuery, ReverseGeocodingPort, ReverseLookup,
};
use async_trait::async_trait;
use domain::GeoLocation;
use integration_geocoding::{
    BigDataCloudClient, ForwardGeocodingClient, GeocodingConfig, GeocodingError,
    NominatimClient, OpenMeteoGeocodingClient, ReverseGeocodingClient,
};
use tracing::{debug, instrument};

/// Map integration geocoding error to application error
fn map_error(err: GeocodingError) -> ApplicationError {
    match err {
        GeocodingError::NotFound(query) => ApplicationError::Resolution(query),
        GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        GeocodingError::ConnectionFailed(_)
        | GeocodingError::RequestFailed(_)
        | GeocodingError::ParseError(_)
        | GeocodingError::Timeout => ApplicationError::Upstream(format!("geocoding: {err}")),
    }
}

// ============================================================================
// Forward
// ============================================================================

/// Name → coordinates via Open-Meteo
pub struct ForwardGeocodingAdapter {
    client: Arc<dyn ForwardGeocodingClient>,
}

impl std::fmt::Debug for ForwardGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardGeocodingAdapter")
            .field("client", &"ForwardGeocodingClient")
            .finish()
    }
}

impl ForwardGeocodingAdapter {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoGeocodingClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn ForwardGeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForwardGeocodingPort for ForwardGeocodingAdapter {
    #[instrument(skip(self), fields(city = %query.city, country = ?query.country_code))]
    async fn search(&self, query: &PlaceQuery) -> Result<GeocodedPlace, ApplicationError> {
        let found = self
            .client
            .search(&query.city, query.country_code.as_deref())
            .await
            .map_err(map_error)?;

        debug!(name = %found.name, location = %found.location, "Forward geocoded");
        Ok(GeocodedPlace {
            name: found.name,
            country_code: found.country_code,
            location: found.location,
        })
    }
}

// ============================================================================
// Reverse
// ============================================================================

/// Coordinates → name via one reverse provider
pub struct ReverseGeocodingAdapter {
    client: Arc<dyn ReverseGeocodingClient>,
}

impl std::fmt::Debug for ReverseGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseGeocodingAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl ReverseGeocodingAdapter {
    pub fn with_client(client: Arc<dyn ReverseGeocodingClient>) -> Self {
        Self { client }
    }

    /// BigDataCloud, then Nominatim
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn default_chain(
        config: &GeocodingConfig,
    ) -> Result<Vec<Arc<dyn ReverseGeocodingPort>>, ApplicationError> {
        let bigdatacloud = BigDataCloudClient::new(config).map_err(map_error)?;
        let nominatim = NominatimClient::new(config).map_err(map_error)?;
        Ok(vec![
            Arc::new(Self::with_client(Arc::new(bigdatacloud))),
            Arc::new(Self::with_client(Arc::new(nominatim))),
        ])
    }
}

#[async_trait]
impl ReverseGeocodingPort for ReverseGeocodingAdapter {
    fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    #[instrument(skip(self), fields(provider = self.client.provider_name(), lat = location.latitude(), lon = location.longitude()))]
    async fn reverse(&self, location: &GeoLocation) -> Result<ReverseLookup, ApplicationError> {
        let found = self
            .client
            .reverse(location.latitude(), location.longitude())
            .await
            .map_err(map_error)?;

        Ok(ReverseLookup {
            name: found.name,
            country_code: found.country_code,
        })
    }
}

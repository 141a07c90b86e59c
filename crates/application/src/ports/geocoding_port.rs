//! Geocoding ports

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place name to look up, optionally constrained to a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceQuery {
    pub city: String,
    pub country_code: Option<String>,
}

impl PlaceQuery {
    pub fn new(city: impl Into<String>, country_code: Option<String>) -> Self {
        Self {
            city: city.into(),
            country_code,
        }
    }
}

/// Forward lookup result
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    /// Country reported by the provider, if any
    pub country_code: Option<String>,
    pub location: GeoLocation,
}

/// Reverse lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseLookup {
    pub name: String,
    pub country_code: Option<String>,
}

/// Name → coordinates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForwardGeocodingPort: Send + Sync {
    async fn search(&self, query: &PlaceQuery) -> Result<GeocodedPlace, ApplicationError>;
}

/// Coordinates → name, one provider of the fallback chain
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReverseGeocodingPort: Send + Sync {
    /// Provider name for logs
    fn provider_name(&self) -> &'static str;

    async fn reverse(&self, location: &GeoLocation) -> Result<ReverseLookup, ApplicationError>;
}

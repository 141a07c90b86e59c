//! Location resolution
//!
//! Forward: one lookup against the forward geocoder, London on failure.
//! Reverse: an ordered provider chain, then the known-city table, then a
//! synthesized placeholder. Neither direction fails the pipeline.

use std::{fmt, sync::Arc};

use domain::{GeoLocation, Place, UNKNOWN_COUNTRY};
use tracing::{debug, info, instrument, warn};

use super::known_cities::known_city_near;
use crate::{
    error::ApplicationError,
    ports::{ForwardGeocodingPort, PlaceQuery, ReverseGeocodingPort},
};

/// Resolves place names and coordinates into a [`Place`]
pub struct LocationResolver {
    forward: Arc<dyn ForwardGeocodingPort>,
    reverse_chain: Vec<Arc<dyn ReverseGeocodingPort>>,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver")
            .field(
                "reverse_chain",
                &self
                    .reverse_chain
                    .iter()
                    .map(|p| p.provider_name())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver; reverse providers are tried in the given order
    pub fn new(
        forward: Arc<dyn ForwardGeocodingPort>,
        reverse_chain: Vec<Arc<dyn ReverseGeocodingPort>>,
    ) -> Self {
        Self {
            forward,
            reverse_chain,
        }
    }

    /// Forward lookup without fallback
    ///
    /// The country is the provider's, else the queried one, else `Unknown`.
    #[instrument(skip(self), fields(city = %query.city))]
    pub async fn try_resolve(&self, query: &PlaceQuery) -> Result<Place, ApplicationError> {
        let found = self.forward.search(query).await.map_err(|e| {
            ApplicationError::Resolution(format!("'{}' could not be geocoded: {e}", query.city))
        })?;

        let country = found
            .country_code
            .filter(|c| !c.trim().is_empty())
            .or_else(|| query.country_code.clone().filter(|c| !c.trim().is_empty()))
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        debug!(name = %found.name, country = %country, location = %found.location, "Place resolved");
        Ok(Place::new(found.name, country, found.location))
    }

    /// Forward lookup; substitutes London, GB when the lookup fails
    pub async fn resolve(&self, query: &PlaceQuery) -> Place {
        match self.try_resolve(query).await {
            Ok(place) => place,
            Err(e) => {
                warn!(city = %query.city, error = %e, "Using default location");
                Place::london_default()
            },
        }
    }

    /// Name the place at `location`
    ///
    /// Each provider is asked in turn; a blank or synthetic name moves on to
    /// the next one. The returned place always keeps the requested coordinates.
    #[instrument(skip(self), fields(lat = %location.latitude(), lon = %location.longitude()))]
    pub async fn reverse_resolve(&self, location: GeoLocation) -> Place {
        for provider in &self.reverse_chain {
            match provider.reverse(&location).await {
                Ok(found) if !Place::is_placeholder_name(&found.name) => {
                    let country = found
                        .country_code
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
                    debug!(provider = provider.provider_name(), name = %found.name, "Reverse geocoded");
                    return Place::new(found.name.trim(), country, location);
                },
                Ok(found) => {
                    debug!(
                        provider = provider.provider_name(),
                        name = %found.name,
                        "Provider returned no usable name"
                    );
                },
                Err(e) => {
                    warn!(
                        provider = provider.provider_name(),
                        lat = %location.latitude(),
                        lon = %location.longitude(),
                        error = %e,
                        "Reverse geocoding failed"
                    );
                },
            }
        }

        if let Some(city) = known_city_near(&location) {
            info!(city = city.name, "Matched known city centroid");
            return city.place_at(location);
        }

        let place = Place::placeholder(location);
        warn!(name = %place.name(), "No provider could name the location");
        place
    }
}

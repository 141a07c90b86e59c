//! Resolved place

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Country code used when no provider reports one
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Marker that identifies a synthesized place name
const PLACEHOLDER_MARKER: &str = "Location";

/// A named location with its country and coordinates
///
/// Produced once per update cycle by geocoding and not changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    name: String,
    country_code: String,
    location: GeoLocation,
}

impl Place {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        location: GeoLocation,
    ) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            location,
        }
    }

    /// London, GB: used whenever forward geocoding yields nothing
    #[must_use]
    pub fn london_default() -> Self {
        Self::new("London", "GB", GeoLocation::london())
    }

    /// Synthetic place for coordinates no provider could name
    ///
    /// The name has the form `Location 40.71,-74.01`.
    #[must_use]
    pub fn placeholder(location: GeoLocation) -> Self {
        Self::new(
            format!(
                "{PLACEHOLDER_MARKER} {:.2},{:.2}",
                location.latitude(),
                location.longitude()
            ),
            UNKNOWN_COUNTRY,
            location,
        )
    }

    /// Whether a provider-returned name is unusable
    ///
    /// Blank names and names containing `Location` are rejected so that the
    /// next provider in the chain gets a chance.
    #[must_use]
    pub fn is_placeholder_name(name: &str) -> bool {
        let trimmed = name.trim();
        trimmed.is_empty() || trimmed.contains(PLACEHOLDER_MARKER)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        Self::is_placeholder_name(&self.name)
    }
}

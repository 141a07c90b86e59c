//! Geocoding data models

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// Result of a forward (name → coordinates) lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardMatch {
    /// Display name reported by the provider
    pub name: String,
    /// ISO 3166-1 alpha-2 code, when reported
    pub country_code: Option<String>,
    pub location: GeoLocation,
}

/// Result of a reverse (coordinates → name) lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseMatch {
    pub name: String,
    /// Upper-cased country code, when reported
    pub country_code: Option<String>,
}

/// Open-Meteo `/search` response
#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoSearchResponse {
    #[serde(default)]
    pub results: Vec<OpenMeteoPlace>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: Option<String>,
}

/// BigDataCloud `/data/reverse-geocode-client` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BigDataCloudResponse {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub country_code: String,
}

impl BigDataCloudResponse {
    /// `city`, else `locality`
    pub fn best_name(&self) -> Option<&str> {
        [self.city.as_str(), self.locality.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Nominatim `/reverse` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NominatimReverseResponse {
    #[serde(default)]
    pub address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimAddress {
    /// First non-empty of city, town, village, municipality, county
    pub fn best_name(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.county,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
    }
}

/// Upper-case a provider country code, dropping blanks
pub(crate) fn normalize_country_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

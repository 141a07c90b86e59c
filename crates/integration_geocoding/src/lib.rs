//! Geocoding integration for the weather agent
//!
//! - [`forward`]: place name → coordinates (Open-Meteo, cached)
//! - [`reverse`]: coordinates → place name (BigDataCloud, Nominatim)

mod config;
mod error;
pub mod forward;
mod models;
pub mod reverse;

pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use forward::{ForwardGeocodingClient, OpenMeteoGeocodingClient};
pub use models::{ForwardMatch, ReverseMatch};
pub use reverse::{BigDataCloudClient, NominatimClient, ReverseGeocodingClient};

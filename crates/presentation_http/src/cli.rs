//! Command-line arguments of the server binary

use clap::Parser;
use infrastructure::LocationOverride;

/// Weather agent HTTP server
///
/// Positional arguments override the configured city and country, e.g.
/// `weather-agent-server Paris fr`.
#[derive(Debug, Parser)]
#[command(name = "weather-agent-server")]
#[command(author, version, about = "Weather agent HTTP server", long_about = None)]
pub struct Cli {
    /// City to report on
    pub city: Option<String>,

    /// Country code used to disambiguate the city
    pub country: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn location_override(&self) -> LocationOverride {
        LocationOverride::new(self.city.clone(), self.country.clone())
    }
}

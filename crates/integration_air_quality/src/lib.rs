//! Air-quality integration for the weather agent
//!
//! Two providers with incompatible scales:
//! - IQAir (primary): U.S. AQI 0-500 plus the dominant pollutant
//! - OpenWeatherMap (secondary): 1-5 index plus component concentrations

mod config;
mod error;
pub mod iqair;
mod models;
pub mod openweathermap;

pub use config::AirQualityConfig;
pub use error::AirQualityError;
pub use iqair::{IqAirClient, IqAirHttpClient};
pub use models::{IqAirPollution, OwmAirPollution, OwmComponents};
pub use openweathermap::{OpenWeatherMapClient, OpenWeatherMapHttpClient};

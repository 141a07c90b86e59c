//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the pipeline reaches external
//! systems. Adapters in the infrastructure layer implement them.

mod air_quality_port;
mod geocoding_port;
mod inference_port;
mod weather_port;

#[cfg(test)]
pub use air_quality_port::MockAirQualityPort;
pub use air_quality_port::AirQualityPort;
#[cfg(test)]
pub use geocoding_port::{MockForwardGeocodingPort, MockReverseGeocodingPort};
pub use geocoding_port::{
    ForwardGeocodingPort, GeocodedPlace, PlaceQuery, ReverseGeocodingPort, ReverseLookup,
};
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;

//! Infrastructure adapters
//!
//! Adapters connect application ports to the integration clients.

mod air_quality_adapter;
mod geocoding_adapter;
mod inference_adapter;
mod weather_adapter;

pub use air_quality_adapter::{IqAirAdapter, OpenWeatherMapAdapter};
pub use geocoding_adapter::{ForwardGeocodingAdapter, ReverseGeocodingAdapter};
pub use inference_adapter::InferenceAdapter;
pub use weather_adapter::WeatherAdapter;

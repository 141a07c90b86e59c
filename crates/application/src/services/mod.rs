//! Application services - the weather update pipeline

mod active_location;
mod aqi_resolver;
mod known_cities;
mod location_resolver;
mod message_composer;
mod report;
mod snapshot_store;
#[cfg(test)]
pub(crate) mod test_support;
mod weather_update_service;

pub use active_location::{ActiveLocation, LocationSetting};
pub use aqi_resolver::AqiResolver;
pub use known_cities::{KNOWN_CITIES, KnownCity, known_city_near};
pub use location_resolver::LocationResolver;
pub use message_composer::MessageComposer;
pub use report::{ReportValue, WeatherReport};
pub use snapshot_store::{PublishedSnapshot, ReportDocument, SnapshotStore};
pub use weather_update_service::WeatherUpdateService;

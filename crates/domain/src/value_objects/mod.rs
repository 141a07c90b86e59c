//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod humidity;
mod unit_system;

pub use geo_location::GeoLocation;
pub use humidity::{Humidity, InvalidHumidity};
pub use unit_system::UnitSystem;

//! Domain layer for the weather agent
//!
//! Contains the canonical weather snapshot, air-quality readings, the
//! condition mapper and the pure derived-metric calculations. This layer
//! performs no I/O and defines the ubiquitous language of the pipeline.

pub mod derived;
pub mod entities;
pub mod errors;
pub mod value_objects;
pub mod weather_condition;

pub use derived::{CompassPoint, Daylight, DaylightBasis, MoonPhase};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
pub use weather_condition::{ConditionLabel, WeatherCondition};

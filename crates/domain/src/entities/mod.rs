//! Domain entities

mod air_quality;
mod composed_message;
mod history;
mod place;
mod weather_snapshot;

pub use air_quality::{
    AqiCategory, AqiReading, AqiSource, IndexCategory, MICROGRAMS_PER_CUBIC_METRE, Pollutant,
    PollutantLevel, UsAqiCategory,
};
pub use composed_message::{ComposedMessage, DedupState, is_repeat};
pub use history::{HISTORY_CAPACITY, HistoryBuffer, SnapshotHistory};
pub use place::{Place, UNKNOWN_COUNTRY};
pub use weather_snapshot::{Precipitation, WeatherObservation, WeatherSnapshot};

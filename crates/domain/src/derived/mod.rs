//! Derived metrics
//!
//! Pure functions computed from an assembled snapshot: heat index, moon
//! phase, compass direction, day/night state and visibility text. Nothing
//! here is stored.

pub mod compass;
pub mod daylight;
pub mod heat_index;
pub mod moon_phase;
pub mod visibility;

pub use compass::CompassPoint;
pub use daylight::{Daylight, DaylightBasis, day_length_hours};
pub use heat_index::{celsius_to_fahrenheit, fahrenheit_to_celsius, heat_index};
pub use moon_phase::MoonPhase;
pub use visibility::{DEFAULT_VISIBILITY_M, effective_visibility_m, format_visibility};

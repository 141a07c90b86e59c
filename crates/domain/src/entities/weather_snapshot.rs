//! Weather snapshot entities
//!
//! A [`WeatherObservation`] is what the forecast provider returns for a
//! coordinate pair. [`WeatherSnapshot::assemble`] seals it together with
//! the resolved place and the optional air-quality reading; the snapshot is
//! immutable from then on and every derived metric is computed from it on
//! demand.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{AqiReading, Place};
use crate::derived::{self, CompassPoint, Daylight, DaylightBasis, MoonPhase};
use crate::value_objects::{Humidity, UnitSystem};
use crate::weather_condition::WeatherCondition;

/// Precipitation accumulations in millimetres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub rain_1h: Option<f64>,
    pub rain_3h: Option<f64>,
    pub snow_1h: Option<f64>,
    pub snow_3h: Option<f64>,
}

impl Precipitation {
    /// Whether any accumulation is strictly positive
    #[must_use]
    pub fn has_any(&self) -> bool {
        [self.rain_1h, self.rain_3h, self.snow_1h, self.snow_3h]
            .into_iter()
            .flatten()
            .any(|mm| mm > 0.0)
    }
}

/// Provisional reading from the forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Local wall-clock time with the provider-reported UTC offset
    pub observed_at: DateTime<FixedOffset>,
    /// IANA zone name, when reported
    pub timezone_name: Option<String>,
    pub condition: WeatherCondition,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: Humidity,
    pub pressure_hpa: Option<f64>,
    pub wind_speed: f64,
    pub wind_direction_deg: f64,
    pub cloud_cover_pct: u8,
    /// Metres, `None` when not reported
    pub visibility_m: Option<f64>,
    pub precipitation: Precipitation,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    /// Units every temperature and speed above is expressed in
    pub units: UnitSystem,
}

/// Sealed reading of weather, air quality and place for one update tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    place: Place,
    observation: WeatherObservation,
    aqi: Option<AqiReading>,
    daylight: Daylight,
}

impl WeatherSnapshot {
    /// Seal an observation into a snapshot
    ///
    /// Day/night is decided here, once, so every consumer sees the same value.
    #[must_use]
    pub fn assemble(place: Place, observation: WeatherObservation, aqi: Option<AqiReading>) -> Self {
        let daylight = Daylight::determine(
            &observation.observed_at,
            observation.sunrise.as_ref(),
            observation.sunset.as_ref(),
        );
        Self {
            place,
            observation,
            aqi,
            daylight,
        }
    }

    #[must_use]
    pub const fn place(&self) -> &Place {
        &self.place
    }

    #[must_use]
    pub const fn observation(&self) -> &WeatherObservation {
        &self.observation
    }

    #[must_use]
    pub const fn aqi(&self) -> Option<&AqiReading> {
        self.aqi.as_ref()
    }

    #[must_use]
    pub const fn units(&self) -> UnitSystem {
        self.observation.units
    }

    /// Local time at the place
    #[must_use]
    pub const fn local_time(&self) -> &DateTime<FixedOffset> {
        &self.observation.observed_at
    }

    #[must_use]
    pub fn timezone_offset_seconds(&self) -> i32 {
        self.observation.observed_at.offset().local_minus_utc()
    }

    #[must_use]
    pub const fn is_daytime(&self) -> bool {
        self.daylight.is_daytime
    }

    #[must_use]
    pub const fn daylight_basis(&self) -> DaylightBasis {
        self.daylight.basis
    }

    /// Heat index in the snapshot's units, when conditions qualify
    #[must_use]
    pub fn heat_index(&self) -> Option<f64> {
        derived::heat_index(
            self.observation.temperature,
            self.observation.humidity,
            self.observation.units,
        )
    }

    #[must_use]
    pub fn moon_phase(&self) -> MoonPhase {
        MoonPhase::at(&self.observation.observed_at)
    }

    #[must_use]
    pub fn wind_direction(&self) -> CompassPoint {
        CompassPoint::from_degrees(self.observation.wind_direction_deg)
    }

    #[must_use]
    pub fn day_length_hours(&self) -> Option<f64> {
        derived::day_length_hours(
            self.observation.sunrise.as_ref(),
            self.observation.sunset.as_ref(),
        )
    }

    #[must_use]
    pub fn visibility_text(&self) -> String {
        derived::format_visibility(self.observation.visibility_m, self.observation.units)
    }
}

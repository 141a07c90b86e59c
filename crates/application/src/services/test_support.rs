//! Snapshot fixtures shared by service tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use domain::{
    AqiReading, GeoLocation, Humidity, Place, Pollutant, PollutantLevel, Precipitation,
    UnitSystem, WeatherCondition, WeatherObservation, WeatherSnapshot,
};

/// New York, 2024-06-01 at `hour:minute` EDT, light rain at 28 °C / 55 %
pub fn observation_at(hour: u32, minute: u32) -> WeatherObservation {
    let offset = FixedOffset::west_opt(4 * 3600).unwrap();
    WeatherObservation {
        observed_at: offset
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 5)
            .unwrap(),
        timezone_name: Some("America/New_York".to_string()),
        condition: WeatherCondition::from_code(61),
        temperature: 28.0,
        feels_like: 30.4,
        humidity: Humidity::new(55).unwrap(),
        pressure_hpa: Some(1009.8),
        wind_speed: 14.8,
        wind_direction_deg: 210.0,
        cloud_cover_pct: 92,
        visibility_m: Some(12_600.0),
        precipitation: Precipitation {
            rain_1h: Some(1.2),
            ..Precipitation::default()
        },
        sunrise: Some(offset.with_ymd_and_hms(2024, 6, 1, 5, 26, 0).unwrap()),
        sunset: Some(offset.with_ymd_and_hms(2024, 6, 1, 20, 22, 0).unwrap()),
        units: UnitSystem::Metric,
    }
}

pub fn new_york() -> Place {
    Place::new("New York", "US", GeoLocation::new_york())
}

pub fn secondary_reading(index: u16) -> AqiReading {
    AqiReading::secondary(
        index,
        Some(12.4),
        Some(20.0),
        vec![
            PollutantLevel::new(Pollutant::CarbonMonoxide, Some(230.3), "μg/m³"),
            PollutantLevel::new(Pollutant::NitrogenDioxide, Some(14.1), "μg/m³"),
            PollutantLevel::new(Pollutant::Ozone, Some(68.7), "μg/m³"),
            PollutantLevel::new(Pollutant::SulfurDioxide, None, "μg/m³"),
        ],
    )
}

pub fn snapshot_at(hour: u32, minute: u32) -> Arc<WeatherSnapshot> {
    Arc::new(WeatherSnapshot::assemble(
        new_york(),
        observation_at(hour, minute),
        None,
    ))
}

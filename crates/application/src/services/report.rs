//! Prepared weather data
//!
//! [`WeatherReport`] flattens a snapshot into ordered, display-ready entries.
//! The same entries feed the generation prompt and the JSON `data` object,
//! so both views always agree.

use std::fmt;

use chrono::Timelike;
use domain::{AqiReading, Pollutant, WeatherSnapshot};
use serde::Serialize;
use serde_json::{Map, Value};

const TIME_12H: &str = "%-I:%M %p";
const TIME_24H: &str = "%H:%M";

/// A single report value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ReportValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ReportValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Ordered key/value view of a snapshot
///
/// Optional entries are left out entirely when their data is unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    entries: Vec<(&'static str, ReportValue)>,
}

impl WeatherReport {
    /// Build the report for a sealed snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let mut report = Self::default();
        let obs = snapshot.observation();
        let local = snapshot.local_time();
        let units = snapshot.units();
        let temp_unit = units.temperature_symbol();

        let time_12h = local.format(TIME_12H).to_string();
        let time_24h = local.format(TIME_24H).to_string();

        report.push("city", snapshot.place().name());
        report.push("country", snapshot.place().country_code());
        report.push(
            "current_local_time",
            format!("{time_12h} ({time_24h} in 24-hour format)"),
        );
        report.push("time_12h", time_12h.as_str());
        report.push("time_24h", time_24h);
        report.push("time_with_seconds", local.format("%-I:%M:%S %p").to_string());
        report.push(
            "full_date_and_time",
            local.format("%A, %B %-d, %Y at %-I:%M %p").to_string(),
        );
        report.push("day_of_week", local.format("%A").to_string());
        report.push("hour_of_day", i64::from(local.hour()));
        report.push(
            "is_daytime_or_night",
            if snapshot.is_daytime() {
                "DAYTIME"
            } else {
                "NIGHTTIME"
            },
        );
        report.push("date", local.format("%B %-d, %Y").to_string());

        report.push("temperature", format!("{:.1}{temp_unit}", obs.temperature));
        report.push("feels_like", format!("{:.1}{temp_unit}", obs.feels_like));
        report.push("condition", obs.condition.label().as_str());
        report.push("description", obs.condition.description());
        report.push("weather_id", i64::from(obs.condition.code()));
        report.push("humidity", obs.humidity.to_string());
        if let Some(pressure) = obs.pressure_hpa {
            report.push("pressure", format!("{pressure:.0} hPa"));
        }
        report.push(
            "wind_speed",
            format!("{:.1} {}", obs.wind_speed, units.wind_speed_unit()),
        );
        report.push("wind_direction", obs.wind_direction_deg);
        report.push("wind_direction_text", snapshot.wind_direction().as_str());
        report.push("visibility", snapshot.visibility_text());
        report.push("cloud_cover", format!("{}%", obs.cloud_cover_pct));

        if let Some(sunrise) = obs.sunrise {
            report.push("sunrise", sunrise.format(TIME_12H).to_string());
        }
        if let Some(sunset) = obs.sunset {
            report.push("sunset", sunset.format(TIME_12H).to_string());
        }
        if let Some(hours) = snapshot.day_length_hours() {
            report.push("day_length", format!("{hours:.1} hours"));
        }
        report.push("moon_phase", snapshot.moon_phase().as_str());
        report.push("units", units.name());
        report.push("is_daytime", snapshot.is_daytime());

        let offset_seconds = snapshot.timezone_offset_seconds();
        report.push("timezone_offset_hours", f64::from(offset_seconds) / 3600.0);
        report.push("timezone_name", utc_offset_name(offset_seconds));

        if let Some(heat_index) = snapshot.heat_index() {
            report.push("heat_index", format!("{heat_index:.1}{temp_unit}"));
        }

        let precipitation = obs.precipitation;
        if precipitation.has_any() {
            for (key, amount) in [
                ("rain_1h", precipitation.rain_1h),
                ("rain_3h", precipitation.rain_3h),
                ("snow_1h", precipitation.snow_1h),
                ("snow_3h", precipitation.snow_3h),
            ] {
                if let Some(mm) = amount.filter(|mm| *mm > 0.0) {
                    report.push(key, format!("{mm:.1} mm"));
                }
            }
        }

        if let Some(aqi) = snapshot.aqi() {
            report.push_aqi(aqi);
        }

        report.push("time", time_12h);
        report
    }

    fn push(&mut self, key: &'static str, value: impl Into<ReportValue>) {
        self.entries.push((key, value.into()));
    }

    fn push_aqi(&mut self, aqi: &AqiReading) {
        self.push("aqi", i64::from(aqi.value()));
        self.push("aqi_description", aqi.description());
        self.push("aqi_source", aqi.source().as_str());

        if let Some(dominant) = aqi.dominant_pollutant() {
            self.push("pollutant_name", dominant.pollutant.name().to_string());
            if let Some(value) = dominant.formatted_value() {
                self.push("pollutant_value", value);
            }
        }
        if let Some(pm2_5) = aqi.pm2_5() {
            self.push("pm2_5", format!("{pm2_5:.1} μg/m³"));
        }
        if let Some(pm10) = aqi.pm10() {
            self.push("pm10", format!("{pm10:.1} μg/m³"));
        }
        for level in aqi.components() {
            let (Some(key), Some(value)) = (component_key(&level.pollutant), level.formatted_value())
            else {
                continue;
            };
            self.push(key, value);
        }
    }

    /// Value for `key`, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReportValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &ReportValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// `key: value` lines in report order
    #[must_use]
    pub fn to_prompt_block(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}: {value}\n"))
            .collect()
    }

    /// JSON object with the same keys
    ///
    /// `serde_json::Map` is a `BTreeMap` here, so keys come out sorted rather
    /// than in report order. Use [`Self::to_prompt_block`] when order matters.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    ReportValue::Text(s) => Value::String(s.clone()),
                    ReportValue::Integer(n) => Value::from(*n),
                    ReportValue::Number(n) => Value::from(*n),
                    ReportValue::Flag(b) => Value::Bool(*b),
                };
                ((*key).to_string(), json)
            })
            .collect()
    }
}

/// Report key for an individual air-pollution component
///
/// PM values are reported separately, so they have no component key.
const fn component_key(pollutant: &Pollutant) -> Option<&'static str> {
    match pollutant {
        Pollutant::CarbonMonoxide => Some("co"),
        Pollutant::NitrogenDioxide => Some("no2"),
        Pollutant::Ozone => Some("o3"),
        Pollutant::SulfurDioxide => Some("so2"),
        Pollutant::Pm25 | Pollutant::Pm10 | Pollutant::Other(_) => None,
    }
}

/// `UTC-4`, `UTC+5:30`, `UTC+0`
fn utc_offset_name(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    if minutes == 0 {
        format!("UTC{sign}{hours}")
    } else {
        format!("UTC{sign}{hours}:{minutes:02}")
    }
}

#[cfg(test)]
mod tests {
    use domain::{AqiReading, Pollutant, PollutantLevel, Precipitation, WeatherSnapshot};

    use super::*;
    use crate::services::test_support::{new_york, observation_at, secondary_reading};

    fn report_at(hour: u32, minute: u32) -> WeatherReport {
        WeatherReport::from_snapshot(&WeatherSnapshot::assemble(
            new_york(),
            observation_at(hour, minute),
            None,
        ))
    }

    fn text(report: &WeatherReport, key: &str) -> String {
        report
            .get(key)
            .map(ToString::to_string)
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    #[test]
    fn time_fields() {
        let report = report_at(15, 4);
        assert_eq!(
            text(&report, "current_local_time"),
            "3:04 PM (15:04 in 24-hour format)"
        );
        assert_eq!(text(&report, "time_12h"), "3:04 PM");
        assert_eq!(text(&report, "time_24h"), "15:04");
        assert_eq!(text(&report, "time_with_seconds"), "3:04:05 PM");
        assert_eq!(
            text(&report, "full_date_and_time"),
            "Saturday, June 1, 2024 at 3:04 PM"
        );
        assert_eq!(text(&report, "day_of_week"), "Saturday");
        assert_eq!(report.get("hour_of_day"), Some(&ReportValue::Integer(15)));
        assert_eq!(text(&report, "date"), "June 1, 2024");
        assert_eq!(text(&report, "time"), "3:04 PM");
    }

    #[test]
    fn weather_fields() {
        let report = report_at(14, 15);
        assert_eq!(text(&report, "temperature"), "28.0°C");
        assert_eq!(text(&report, "feels_like"), "30.4°C");
        assert_eq!(text(&report, "condition"), "Rain");
        assert_eq!(text(&report, "description"), "slight rain");
        assert_eq!(report.get("weather_id"), Some(&ReportValue::Integer(61)));
        assert_eq!(text(&report, "humidity"), "55%");
        assert_eq!(text(&report, "pressure"), "1010 hPa");
        assert_eq!(text(&report, "wind_speed"), "14.8 km/h");
        assert_eq!(text(&report, "wind_direction_text"), "S");
        assert_eq!(text(&report, "visibility"), "12.6 km");
        assert_eq!(text(&report, "cloud_cover"), "92%");
        assert_eq!(text(&report, "sunrise"), "5:26 AM");
        assert_eq!(text(&report, "sunset"), "8:22 PM");
        assert_eq!(text(&report, "day_length"), "14.9 hours");
        assert_eq!(text(&report, "units"), "metric");
        assert_eq!(text(&report, "rain_1h"), "1.2 mm");
        assert!(report.get("snow_1h").is_none());
    }

    #[test]
    fn daylight_and_timezone() {
        let day = report_at(14, 15);
        assert_eq!(text(&day, "is_daytime_or_night"), "DAYTIME");
        assert_eq!(day.get("is_daytime"), Some(&ReportValue::Flag(true)));
        assert_eq!(
            day.get("timezone_offset_hours"),
            Some(&ReportValue::Number(-4.0))
        );
        assert_eq!(text(&day, "timezone_name"), "UTC-4");

        let night = report_at(22, 0);
        assert_eq!(text(&night, "is_daytime_or_night"), "NIGHTTIME");
    }

    #[test]
    fn heat_index_present_when_hot_and_humid() {
        let report = report_at(14, 15);
        assert!(report.get("heat_index").is_some());

        let mut cool = observation_at(14, 15);
        cool.temperature = 10.0;
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(new_york(), cool, None));
        assert!(report.get("heat_index").is_none());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let mut obs = observation_at(14, 15);
        obs.pressure_hpa = None;
        obs.sunrise = None;
        obs.precipitation.rain_1h = Some(0.0);
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(new_york(), obs, None));

        for key in ["pressure", "sunrise", "day_length", "rain_1h", "aqi", "aqi_source"] {
            assert!(report.get(key).is_none(), "{key} should be omitted");
        }
        assert_eq!(text(&report, "sunset"), "8:22 PM");
    }

    #[test]
    fn precipitation_block_only_when_something_fell() {
        let mut dry = observation_at(14, 15);
        dry.precipitation = Precipitation {
            rain_1h: Some(0.0),
            snow_3h: Some(0.0),
            ..Precipitation::default()
        };
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(new_york(), dry, None));
        for key in ["rain_1h", "rain_3h", "snow_1h", "snow_3h"] {
            assert!(report.get(key).is_none(), "{key} should be omitted");
        }

        let mut snowy = observation_at(14, 15);
        snowy.precipitation = Precipitation {
            snow_1h: Some(0.4),
            snow_3h: Some(1.3),
            ..Precipitation::default()
        };
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(new_york(), snowy, None));
        assert_eq!(text(&report, "snow_1h"), "0.4 mm");
        assert_eq!(text(&report, "snow_3h"), "1.3 mm");
        assert!(report.get("rain_1h").is_none());
    }

    #[test]
    fn primary_aqi_block() {
        let reading = AqiReading::primary(
            120,
            Some(PollutantLevel::new(Pollutant::Ozone, Some(41.0), "ppb")),
            None,
            None,
        );
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(
            new_york(),
            observation_at(14, 15),
            Some(reading),
        ));

        assert_eq!(report.get("aqi"), Some(&ReportValue::Integer(120)));
        assert_eq!(
            text(&report, "aqi_description"),
            "Unhealthy for Sensitive Groups"
        );
        assert_eq!(text(&report, "aqi_source"), "PrimaryProvider");
        assert_eq!(text(&report, "pollutant_name"), "Ozone");
        assert_eq!(text(&report, "pollutant_value"), "41.0 ppb");
        assert!(report.get("pm2_5").is_none());
    }

    #[test]
    fn secondary_aqi_block_carries_components() {
        let report = WeatherReport::from_snapshot(&WeatherSnapshot::assemble(
            new_york(),
            observation_at(14, 15),
            Some(secondary_reading(3)),
        ));

        assert_eq!(report.get("aqi"), Some(&ReportValue::Integer(3)));
        assert_eq!(text(&report, "aqi_source"), "SecondaryProvider");
        assert!(text(&report, "aqi_description").starts_with("Moderate"));
        assert_eq!(text(&report, "pm2_5"), "12.4 μg/m³");
        assert_eq!(text(&report, "pm10"), "20.0 μg/m³");
        assert_eq!(text(&report, "co"), "230.3 μg/m³");
        assert_eq!(text(&report, "o3"), "68.7 μg/m³");
        assert!(report.get("so2").is_none());
        assert!(report.get("pollutant_name").is_none());
    }

    #[test]
    fn ordering_is_stable() {
        let report = report_at(14, 15);
        let keys: Vec<_> = report.entries().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"city"));
        assert_eq!(keys.get(1), Some(&"country"));
        assert_eq!(keys.last(), Some(&"time"));

        let block = report.to_prompt_block();
        assert!(block.starts_with("city: New York\ncountry: US\n"));
        assert!(block.ends_with("time: 2:15 PM\n"));
    }

    #[test]
    fn json_map_preserves_types() {
        let map = report_at(14, 15).to_json_map();
        assert_eq!(map["temperature"], Value::String("28.0°C".into()));
        assert_eq!(map["weather_id"], Value::from(61));
        assert_eq!(map["is_daytime"], Value::Bool(true));
        assert!(!map.contains_key("aqi"));
    }

    #[test]
    fn json_map_keys_are_sorted() {
        let report = report_at(14, 15);
        let map = report.to_json_map();
        assert_eq!(map.len(), report.entries().count());

        let keys: Vec<&String> = map.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let report_order: Vec<&str> = report.entries().map(|(key, _)| key).collect();
        let map_order: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_ne!(report_order, map_order);
    }

    #[test]
    fn utc_offset_names() {
        assert_eq!(utc_offset_name(0), "UTC+0");
        assert_eq!(utc_offset_name(-4 * 3600), "UTC-4");
        assert_eq!(utc_offset_name(19_800), "UTC+5:30");
        assert_eq!(utc_offset_name(-12_600), "UTC-3:30");
        assert_eq!(utc_offset_name(-1800), "UTC-0:30");
    }
}

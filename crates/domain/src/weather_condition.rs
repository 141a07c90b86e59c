//! WMO weather code interpretation
//!
//! Maps the numeric codes reported by the forecast provider to a coarse
//! condition label and a human-readable description. Total over `i32`:
//! anything outside the WMO table is `Unknown`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse condition category, bucketed by code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionLabel {
    Clear,
    MainlyClear,
    Clouds,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    Unknown,
}

impl ConditionLabel {
    /// Every label, in code order
    pub const ALL: [Self; 11] = [
        Self::Clear,
        Self::MainlyClear,
        Self::Clouds,
        Self::Fog,
        Self::Drizzle,
        Self::Rain,
        Self::Snow,
        Self::RainShowers,
        Self::SnowShowers,
        Self::Thunderstorm,
        Self::Unknown,
    ];

    /// Bucket a WMO code into its label
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MainlyClear,
            2..=3 => Self::Clouds,
            45..=49 => Self::Fog,
            51..=59 => Self::Drizzle,
            61..=69 => Self::Rain,
            71..=79 => Self::Snow,
            80..=82 => Self::RainShowers,
            85..=86 => Self::SnowShowers,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Display text of the label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::MainlyClear => "Mainly Clear",
            Self::Clouds => "Clouds",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description for an exact WMO code
#[must_use]
pub const fn describe_code(code: i32) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 => "fog",
        48 => "depositing rime fog",
        51 => "light drizzle",
        53 => "moderate drizzle",
        55 => "dense drizzle",
        61 => "slight rain",
        63 => "moderate rain",
        65 => "heavy rain",
        71 => "slight snow fall",
        73 => "moderate snow fall",
        75 => "heavy snow fall",
        80 => "slight rain showers",
        81 => "moderate rain showers",
        82 => "violent rain showers",
        85 => "slight snow showers",
        86 => "heavy snow showers",
        95 => "thunderstorm",
        96 | 99 => "thunderstorm with hail",
        _ => "unknown conditions",
    }
}

/// A weather code together with its interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    code: i32,
    label: ConditionLabel,
}

impl WeatherCondition {
    /// Interpret a WMO weather code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self {
            code,
            label: ConditionLabel::from_code(code),
        }
    }

    /// The raw provider code
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    pub const fn label(&self) -> ConditionLabel {
        self.label
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        describe_code(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_buckets() {
        assert_eq!(ConditionLabel::from_code(0), ConditionLabel::Clear);
        assert_eq!(ConditionLabel::from_code(1), ConditionLabel::MainlyClear);
        assert_eq!(ConditionLabel::from_code(3), ConditionLabel::Clouds);
        assert_eq!(ConditionLabel::from_code(48), ConditionLabel::Fog);
        assert_eq!(ConditionLabel::from_code(57), ConditionLabel::Drizzle);
        assert_eq!(ConditionLabel::from_code(61), ConditionLabel::Rain);
        assert_eq!(ConditionLabel::from_code(77), ConditionLabel::Snow);
        assert_eq!(ConditionLabel::from_code(81), ConditionLabel::RainShowers);
        assert_eq!(ConditionLabel::from_code(86), ConditionLabel::SnowShowers);
        assert_eq!(ConditionLabel::from_code(99), ConditionLabel::Thunderstorm);
    }

    #[test]
    fn gaps_and_out_of_range_are_unknown() {
        for code in [-1, 4, 44, 50, 60, 70, 83, 84, 87, 94, 100, i32::MAX, i32::MIN] {
            assert_eq!(ConditionLabel::from_code(code), ConditionLabel::Unknown, "code {code}");
        }
    }

    #[test]
    fn descriptions() {
        assert_eq!(describe_code(2), "partly cloudy");
        assert_eq!(describe_code(48), "depositing rime fog");
        assert_eq!(describe_code(61), "slight rain");
        assert_eq!(describe_code(96), "thunderstorm with hail");
        assert_eq!(describe_code(99), "thunderstorm with hail");
        assert_eq!(describe_code(97), "unknown conditions");
        assert_eq!(describe_code(-5), "unknown conditions");
    }

    #[test]
    fn condition_combines_label_and_description() {
        let condition = WeatherCondition::from_code(61);
        assert_eq!(condition.code(), 61);
        assert_eq!(condition.label().to_string(), "Rain");
        assert_eq!(condition.description(), "slight rain");
    }

    #[test]
    fn label_text() {
        assert_eq!(ConditionLabel::MainlyClear.as_str(), "Mainly Clear");
        assert_eq!(ConditionLabel::SnowShowers.as_str(), "Snow showers");
    }
}

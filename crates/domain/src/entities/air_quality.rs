//! Air quality readings
//!
//! The two upstream providers report on scales that are not comparable: a
//! US AQI from 0 to 500 and a European-style index from 1 to 5. A reading
//! keeps its scale in the category tag, and the source is derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit for particulate concentrations
pub const MICROGRAMS_PER_CUBIC_METRE: &str = "μg/m³";

/// US EPA AQI category, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UsAqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl UsAqiCategory {
    #[must_use]
    pub const fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// Category on the 1-5 air-pollution index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndexCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    /// Index outside 1-5
    Unrecognized,
}

impl IndexCategory {
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        match index {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unrecognized => "Unknown",
        }
    }

    /// Health guidance for an index value
    #[must_use]
    pub fn description(self, index: u16) -> String {
        match self {
            Self::Good => "Good (1): Air quality is considered satisfactory, and air pollution poses little or no risk.".to_string(),
            Self::Fair => "Fair (2): Air quality is acceptable; however, for some pollutants there may be a moderate health concern for a very small number of people.".to_string(),
            Self::Moderate => "Moderate (3): Members of sensitive groups may experience health effects. The general public is not likely to be affected.".to_string(),
            Self::Poor => "Poor (4): Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects.".to_string(),
            Self::VeryPoor => "Very Poor (5): Health warnings of emergency conditions. The entire population is more likely to be affected.".to_string(),
            Self::Unrecognized => format!("Unknown AQI value: {index}"),
        }
    }
}

/// Scale-tagged AQI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scale", content = "category", rename_all = "snake_case")]
pub enum AqiCategory {
    /// US AQI, 0-500
    Us(UsAqiCategory),
    /// Air-pollution index, 1-5
    Index(IndexCategory),
}

impl AqiCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Us(category) => category.label(),
            Self::Index(category) => category.label(),
        }
    }
}

/// Which provider produced a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiSource {
    PrimaryProvider,
    SecondaryProvider,
}

impl AqiSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryProvider => "PrimaryProvider",
            Self::SecondaryProvider => "SecondaryProvider",
        }
    }
}

impl fmt::Display for AqiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pollutant identified by a provider code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    Pm10,
    Ozone,
    NitrogenDioxide,
    SulfurDioxide,
    CarbonMonoxide,
    /// Unrecognized code, kept verbatim
    Other(String),
}

impl Pollutant {
    /// Parse a main-pollutant code (`p2`, `p1`, `o3`, `n2`, `s2`, `co`)
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "p2" => Self::Pm25,
            "p1" => Self::Pm10,
            "o3" => Self::Ozone,
            "n2" => Self::NitrogenDioxide,
            "s2" => Self::SulfurDioxide,
            "co" => Self::CarbonMonoxide,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::Ozone => "Ozone",
            Self::NitrogenDioxide => "Nitrogen Dioxide",
            Self::SulfurDioxide => "Sulfur Dioxide",
            Self::CarbonMonoxide => "Carbon Monoxide",
            Self::Other(code) => code,
        }
    }

    /// Unit the primary provider reports this pollutant in
    #[must_use]
    pub const fn primary_unit(&self) -> &'static str {
        match self {
            Self::Ozone | Self::NitrogenDioxide | Self::SulfurDioxide => "ppb",
            Self::CarbonMonoxide => "ppm",
            Self::Pm25 | Self::Pm10 | Self::Other(_) => MICROGRAMS_PER_CUBIC_METRE,
        }
    }
}

/// A pollutant concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantLevel {
    pub pollutant: Pollutant,
    /// Absent when the provider did not report a matching value
    pub value: Option<f64>,
    pub unit: String,
}

impl PollutantLevel {
    #[must_use]
    pub fn new(pollutant: Pollutant, value: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            pollutant,
            value,
            unit: unit.into(),
        }
    }

    /// `"12.3 μg/m³"`, or `None` without a value
    #[must_use]
    pub fn formatted_value(&self) -> Option<String> {
        self.value.map(|v| format!("{v:.1} {}", self.unit))
    }
}

/// Normalized air-quality reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    value: u16,
    category: AqiCategory,
    dominant_pollutant: Option<PollutantLevel>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    components: Vec<PollutantLevel>,
}

impl AqiReading {
    /// Reading on the US AQI scale
    #[must_use]
    pub const fn primary(
        us_aqi: u16,
        dominant_pollutant: Option<PollutantLevel>,
        pm2_5: Option<f64>,
        pm10: Option<f64>,
    ) -> Self {
        Self {
            value: us_aqi,
            category: AqiCategory::Us(UsAqiCategory::from_aqi(us_aqi)),
            dominant_pollutant,
            pm2_5,
            pm10,
            components: Vec::new(),
        }
    }

    /// Reading on the 1-5 index scale, with its individual components
    #[must_use]
    pub const fn secondary(
        index: u16,
        pm2_5: Option<f64>,
        pm10: Option<f64>,
        components: Vec<PollutantLevel>,
    ) -> Self {
        Self {
            value: index,
            category: AqiCategory::Index(IndexCategory::from_index(index)),
            dominant_pollutant: None,
            pm2_5,
            pm10,
            components,
        }
    }

    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }

    #[must_use]
    pub const fn category(&self) -> AqiCategory {
        self.category
    }

    #[must_use]
    pub const fn source(&self) -> AqiSource {
        match self.category {
            AqiCategory::Us(_) => AqiSource::PrimaryProvider,
            AqiCategory::Index(_) => AqiSource::SecondaryProvider,
        }
    }

    /// Human-readable category for the reading's own scale
    #[must_use]
    pub fn description(&self) -> String {
        match self.category {
            AqiCategory::Us(category) => category.label().to_string(),
            AqiCategory::Index(category) => category.description(self.value),
        }
    }

    #[must_use]
    pub const fn dominant_pollutant(&self) -> Option<&PollutantLevel> {
        self.dominant_pollutant.as_ref()
    }

    #[must_use]
    pub const fn pm2_5(&self) -> Option<f64> {
        self.pm2_5
    }

    #[must_use]
    pub const fn pm10(&self) -> Option<f64> {
        self.pm10
    }

    /// Extra pollutant components (secondary provider only)
    #[must_use]
    pub fn components(&self) -> &[PollutantLevel] {
        &self.components
    }
}

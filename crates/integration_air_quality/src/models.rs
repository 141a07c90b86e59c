//! Provider measurement models
//!
//! These stay close to each provider's wire shape; scale-aware
//! normalization happens in the adapter that consumes them.

use serde::{Deserialize, Serialize};

/// IQAir nearest-city pollution block (U.S. AQI scale, 0-500)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqAirPollution {
    /// U.S. AQI value
    #[serde(rename = "aqius")]
    pub aqi_us: u16,
    /// Dominant pollutant code (`p2`, `p1`, `o3`, `n2`, `s2`, `co`)
    #[serde(rename = "mainus", default)]
    pub main_pollutant: String,
    /// PM2.5 (μg/m³)
    #[serde(default)]
    pub p2: Option<f64>,
    /// PM10 (μg/m³)
    #[serde(default)]
    pub p1: Option<f64>,
    /// Ozone (ppb)
    #[serde(default)]
    pub o3: Option<f64>,
    /// Nitrogen dioxide (ppb)
    #[serde(default)]
    pub n2: Option<f64>,
    /// Sulfur dioxide (ppb)
    #[serde(default)]
    pub s2: Option<f64>,
    /// Carbon monoxide (ppm)
    #[serde(default)]
    pub co: Option<f64>,
}

impl IqAirPollution {
    /// Concentration for a pollutant code, if the provider reported it
    pub fn concentration(&self, code: &str) -> Option<f64> {
        match code {
            "p2" => self.p2,
            "p1" => self.p1,
            "o3" => self.o3,
            "n2" => self.n2,
            "s2" => self.s2,
            "co" => self.co,
            _ => None,
        }
    }
}

/// OpenWeatherMap air-pollution measurement (1-5 index scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwmAirPollution {
    /// Air quality index, 1 (good) to 5 (very poor)
    pub index: u16,
    pub components: OwmComponents,
}

/// Pollutant concentrations in μg/m³
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwmComponents {
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub no: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub nh3: Option<f64>,
}

// ============================================================================
// Wire envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct IqAirResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<IqAirData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IqAirData {
    pub current: IqAirCurrent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IqAirCurrent {
    pub pollution: IqAirPollution,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmResponse {
    #[serde(default)]
    pub list: Vec<OwmEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmEntry {
    pub main: OwmMain,
    #[serde(default)]
    pub components: OwmComponents,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmMain {
    pub aqi: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iqair_pollution_from_wire() {
        let pollution: IqAirPollution = serde_json::from_str(
            r#"{"ts": "2024-06-01T14:00:00.000Z", "aqius": 57, "mainus": "p2", "aqicn": 22, "maincn": "p2", "p2": 14.2}"#,
        )
        .unwrap();
        assert_eq!(pollution.aqi_us, 57);
        assert_eq!(pollution.main_pollutant, "p2");
        assert_eq!(pollution.concentration("p2"), Some(14.2));
        assert_eq!(pollution.concentration("o3"), None);
        assert_eq!(pollution.concentration("xx"), None);
    }

    #[test]
    fn owm_entry_tolerates_missing_components() {
        let response: OwmResponse =
            serde_json::from_str(r#"{"list": [{"main": {"aqi": 2}, "dt": 1717250400}]}"#).unwrap();
        assert_eq!(response.list[0].main.aqi, 2);
        assert_eq!(response.list[0].components, OwmComponents::default());
    }
}

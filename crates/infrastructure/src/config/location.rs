//! Location and update schedule

use std::time::Duration;

use domain::UnitSystem;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Startup location of the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAppConfig {
    #[serde(default = "default_city")]
    pub city: String,

    /// Country code used to disambiguate the city (`uk` is accepted for GB)
    #[serde(default = "default_country")]
    pub country: Option<String>,

    #[serde(default)]
    pub units: UnitSystem,
}

fn default_city() -> String {
    "London".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_country() -> Option<String> {
    Some("uk".to_string())
}

impl Default for LocationAppConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
            units: UnitSystem::default(),
        }
    }
}

/// City and country given on the command line
///
/// Applied after every load so a SIGHUP reload keeps them. Blank values
/// leave the loaded setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationOverride {
    pub city: Option<String>,
    pub country: Option<String>,
}

impl LocationOverride {
    #[must_use]
    pub fn new(city: Option<String>, country: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            city: non_blank(city),
            country: non_blank(country),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.city.is_none() && self.country.is_none()
    }

    pub fn apply(&self, location: &mut LocationAppConfig) {
        if let Some(city) = &self.city {
            location.city.clone_from(city);
        }
        if let Some(country) = &self.country {
            location.country = Some(country.clone());
        }
    }
}

/// Periodic update schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Minutes between pipeline runs (at least 1)
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Run once immediately at startup
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

const fn default_interval_minutes() -> u64 {
    1
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            run_on_startup: true,
        }
    }
}

impl UpdaterConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        let minutes = if self.interval_minutes == 0 {
            1
        } else {
            self.interval_minutes
        };
        Duration::from_secs(minutes * 60)
    }
}

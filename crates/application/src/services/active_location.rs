//! Runtime-settable active location
//!
//! Each update tick reads a copy of the current setting. Changes bump the
//! version so callers can tell which setting a snapshot was built from.

use domain::{DomainError, UnitSystem};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::{error::ApplicationError, ports::PlaceQuery};

/// A versioned location setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSetting {
    pub city: String,
    pub country_code: Option<String>,
    pub units: UnitSystem,
    pub version: u64,
}

impl LocationSetting {
    /// Forward-geocoding query for this setting
    #[must_use]
    pub fn query(&self) -> PlaceQuery {
        PlaceQuery::new(self.city.clone(), self.country_code.clone())
    }
}

/// Holder of the active [`LocationSetting`]
#[derive(Debug)]
pub struct ActiveLocation {
    inner: RwLock<LocationSetting>,
}

fn normalize_country(country: Option<String>) -> Option<String> {
    country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

impl ActiveLocation {
    /// Start at version 1
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank city.
    pub fn new(
        city: impl Into<String>,
        country_code: Option<String>,
        units: UnitSystem,
    ) -> Result<Self, ApplicationError> {
        let city = validate_city(city.into())?;
        Ok(Self {
            inner: RwLock::new(LocationSetting {
                city,
                country_code: normalize_country(country_code),
                units,
                version: 1,
            }),
        })
    }

    /// Copy of the current setting
    pub fn current(&self) -> LocationSetting {
        self.inner.read().clone()
    }

    /// Point the agent at a new city
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank city; the setting is unchanged.
    pub fn set(
        &self,
        city: impl Into<String>,
        country_code: Option<String>,
    ) -> Result<LocationSetting, ApplicationError> {
        let city = validate_city(city.into())?;
        let mut setting = self.inner.write();
        setting.city = city;
        setting.country_code = normalize_country(country_code);
        setting.version += 1;
        info!(
            city = %setting.city,
            country = ?setting.country_code,
            version = setting.version,
            "Active location changed"
        );
        Ok(setting.clone())
    }

    /// Change the unit system, bumping the version when it differs
    pub fn set_units(&self, units: UnitSystem) -> LocationSetting {
        let mut setting = self.inner.write();
        if setting.units != units {
            setting.units = units;
            setting.version += 1;
            info!(units = %units, version = setting.version, "Unit system changed");
        }
        setting.clone()
    }
}

fn validate_city(city: String) -> Result<String, ApplicationError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError("City must not be empty".to_string()).into());
    }
    Ok(trimmed.to_string())
}

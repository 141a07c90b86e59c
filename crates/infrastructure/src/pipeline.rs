//! Wiring of the update pipeline from configuration

use std::sync::Arc;

use application::{
    ActiveLocation, AqiResolver, LocationResolver, MessageComposer, SnapshotStore,
    WeatherUpdateService, error::ApplicationError, ports::AirQualityPort,
};
use tracing::{info, warn};

use crate::adapters::{
    ForwardGeocodingAdapter, InferenceAdapter, IqAirAdapter, OpenWeatherMapAdapter,
    ReverseGeocodingAdapter, WeatherAdapter,
};
use crate::config::AppConfig;

/// Active location seeded from `[location]`
///
/// # Errors
///
/// Returns a validation error for a blank city.
pub fn build_active_location(config: &AppConfig) -> Result<Arc<ActiveLocation>, ApplicationError> {
    let location = &config.location;
    Ok(Arc::new(ActiveLocation::new(
        location.city.clone(),
        location.country.clone(),
        location.units,
    )?))
}

/// Air-quality chain from whichever providers have keys
///
/// # Errors
///
/// Returns an error if an HTTP client fails to initialize.
pub fn build_aqi_resolver(config: &AppConfig) -> Result<AqiResolver, ApplicationError> {
    let client_config = config.air_quality.to_client_config();

    let primary: Option<Arc<dyn AirQualityPort>> = if client_config.iqair_enabled() {
        Some(Arc::new(IqAirAdapter::new(&client_config)?))
    } else {
        None
    };
    let secondary: Option<Arc<dyn AirQualityPort>> = if client_config.openweathermap_enabled() {
        Some(Arc::new(OpenWeatherMapAdapter::new(&client_config)?))
    } else {
        None
    };

    if primary.is_none() && secondary.is_none() {
        warn!("No air-quality provider configured, snapshots will carry no AQI");
        return Ok(AqiResolver::disabled());
    }
    Ok(AqiResolver::new(primary, secondary))
}

/// Build the update service with every adapter wired to its port
///
/// # Errors
///
/// Returns [`ApplicationError::Configuration`] when the LLM key is missing,
/// or an error if an HTTP client fails to initialize.
pub fn build_update_service(
    config: &AppConfig,
    location: Arc<ActiveLocation>,
    store: Arc<SnapshotStore>,
) -> Result<WeatherUpdateService, ApplicationError> {
    let api_key = config
        .llm
        .api_key
        .clone()
        .ok_or_else(|| ApplicationError::Configuration("LLM API key is required".to_string()))?;

    let forward = Arc::new(ForwardGeocodingAdapter::new(&config.geocoding)?);
    let reverse_chain = ReverseGeocodingAdapter::default_chain(&config.geocoding)?;
    let resolver = LocationResolver::new(forward, reverse_chain);

    let weather = Arc::new(WeatherAdapter::new(config.weather.clone())?);
    let aqi = build_aqi_resolver(config)?;

    let inference = Arc::new(InferenceAdapter::new(
        config.llm.to_inference_config(),
        api_key,
    )?);
    let composer = MessageComposer::new(inference, config.llm.system_prompt.clone());

    info!(
        provider = %config.llm.provider,
        aqi_enabled = aqi.is_enabled(),
        city = %location.current().city,
        "Update pipeline ready"
    );

    Ok(WeatherUpdateService::new(
        location, resolver, weather, aqi, composer, store,
    ))
}

#[cfg(test)]
mod tests {
    use domain::UnitSystem;
    use secrecy::SecretString;

    use super::*;

    fn keyed_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = Some(SecretString::from("sk-ant-test"));
        config
    }

    #[test]
    fn active_location_from_config() {
        let mut config = AppConfig::default();
        config.location.units = UnitSystem::Imperial;
        let location = build_active_location(&config).unwrap();
        let setting = location.current();
        assert_eq!(setting.city, "London");
        assert_eq!(setting.units, UnitSystem::Imperial);
        assert_eq!(setting.version, 1);
    }

    #[test]
    fn blank_city_is_rejected() {
        let mut config = AppConfig::default();
        config.location.city = "  ".to_string();
        assert!(build_active_location(&config).is_err());
    }

    #[test]
    fn aqi_disabled_without_keys() {
        let resolver = build_aqi_resolver(&AppConfig::default()).unwrap();
        assert!(!resolver.is_enabled());
    }

    #[test]
    fn aqi_enabled_with_secondary_key_only() {
        let mut config = AppConfig::default();
        config.air_quality.openweathermap_api_key = Some(SecretString::from("owm"));
        assert!(build_aqi_resolver(&config).unwrap().is_enabled());
    }

    #[tokio::test]
    async fn update_service_requires_llm_key() {
        let config = AppConfig::default();
        let location = build_active_location(&config).unwrap();
        let result = build_update_service(&config, location, Arc::new(SnapshotStore::new()));
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[tokio::test]
    async fn update_service_builds_with_key() {
        let config = keyed_config();
        let location = build_active_location(&config).unwrap();
        let store = Arc::new(SnapshotStore::new());
        let service = build_update_service(&config, location, store.clone()).unwrap();
        assert!(Arc::ptr_eq(service.store(), &store));
        assert_eq!(service.history_len().await, 0);
    }
}

//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and log format
//! - `location`: startup place and update schedule
//! - `llm`: text-generation backend
//! - `integrations`: air-quality providers and telemetry
//!
//! Weather and geocoding sections reuse the client configs directly.

mod integrations;
mod llm;
mod location;
mod server;

use std::path::PathBuf;

use domain::UnitSystem;
use integration_geocoding::GeocodingConfig;
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use integrations::{AirQualityAppConfig, TelemetryAppConfig};
pub use llm::LlmAppConfig;
pub use location::{LocationAppConfig, LocationOverride, UpdaterConfig};
pub use server::{LogFormat, ServerConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment prefix, e.g. `WEATHER_AGENT_SERVER__PORT`
pub const ENV_PREFIX: &str = "WEATHER_AGENT";

/// Configuration loading or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub location: LocationAppConfig,

    #[serde(default)]
    pub updater: UpdaterConfig,

    #[serde(default)]
    pub llm: LlmAppConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub geocoding: GeocodingConfig,

    #[serde(default)]
    pub air_quality: AirQualityAppConfig,

    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from the optional `config` file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load from an optional file (any format `config` recognizes) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Load from file if exists
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables (e.g., WEATHER_AGENT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load, then overlay the flat legacy variables from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or a legacy variable does not parse.
    pub fn load_with_legacy_env() -> Result<Self, ConfigError> {
        let mut config = Self::load()?;
        config.apply_legacy_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// [`Self::load_with_legacy_env`] followed by the command-line location
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or a legacy variable does not parse.
    pub fn load_with_override(location: &LocationOverride) -> Result<Self, ConfigError> {
        let mut config = Self::load_with_legacy_env()?;
        location.apply(&mut config.location);
        Ok(config)
    }

    /// Overlay flat variables such as `LLM_API_KEY` or `WEATHER_CITY`
    ///
    /// Blank values are ignored. `WEATHER_LOG_TO_FILE` is on for `true` or
    /// `1` and off for anything else.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for values that do not parse.
    pub fn apply_legacy_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = get("LLM_API_KEY") {
            self.llm.api_key = Some(SecretString::from(key));
        }
        if let Some(provider) = get("LLM_PROVIDER") {
            self.llm.provider = provider.parse().map_err(ConfigError::Invalid)?;
        }
        if let Some(model) = get("LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(temperature) = get("LLM_TEMPERATURE") {
            self.llm.temperature = temperature
                .parse()
                .map_err(|_| invalid("LLM_TEMPERATURE", &temperature))?;
        }
        if let Some(prompt) = get("LLM_SYSTEM_PROMPT") {
            self.llm.system_prompt = prompt;
        }
        if let Some(key) = get("IQAIR_API_KEY") {
            self.air_quality.iqair_api_key = Some(SecretString::from(key));
        }
        if let Some(key) = get("WEATHER_API_KEY") {
            self.air_quality.openweathermap_api_key = Some(SecretString::from(key));
        }
        if let Some(city) = get("WEATHER_CITY") {
            self.location.city = city;
        }
        if let Some(country) = get("WEATHER_COUNTRY") {
            self.location.country = Some(country);
        }
        if let Some(units) = get("WEATHER_UNITS") {
            self.location.units = units
                .parse::<UnitSystem>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if let Some(minutes) = get("WEATHER_CHECK_INTERVAL") {
            self.updater.interval_minutes = minutes
                .parse()
                .map_err(|_| invalid("WEATHER_CHECK_INTERVAL", &minutes))?;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.parse().map_err(|_| invalid("PORT", &port))?;
        }
        if let Some(flag) = get("WEATHER_LOG_TO_FILE") {
            self.telemetry.log_to_file = flag.eq_ignore_ascii_case("true") || flag == "1";
        }
        if let Some(path) = get("WEATHER_LOG_FILE") {
            self.telemetry.log_file = PathBuf::from(path);
        }

        Ok(())
    }

    /// Startup validation for the server binary
    ///
    /// Missing air-quality keys only disable that provider and are logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the LLM key is missing or a
    /// value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.llm.has_api_key() {
            return Err(ConfigError::Invalid(
                "LLM API key is required (set LLM_API_KEY or WEATHER_AGENT_LLM__API_KEY)"
                    .to_string(),
            ));
        }
        if self.updater.interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "updater.interval_minutes must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.location.city.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "location.city must not be empty".to_string(),
            ));
        }

        let air_quality = self.air_quality.to_client_config();
        if !air_quality.iqair_enabled() {
            warn!("IQAir API key not set, primary air-quality provider disabled");
        }
        if !air_quality.openweathermap_enabled() {
            warn!("OpenWeatherMap API key not set, secondary air-quality provider disabled");
        }

        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid(format!("{key} has an invalid value: {value}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ai_core::LlmProvider;
    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = Some(SecretString::from("sk-ant-test"));
        config
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.location.city, "London");
        assert_eq!(config.location.country.as_deref(), Some("uk"));
        assert_eq!(config.updater.interval_minutes, 1);
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.geocoding.timeout_secs, 5);
        assert_eq!(config.air_quality.timeout_secs, 10);
    }

    #[test]
    fn legacy_env_overlay() {
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(lookup(&[
                ("LLM_API_KEY", "sk-test"),
                ("LLM_PROVIDER", "openai"),
                ("LLM_MODEL", "gpt-4o-mini"),
                ("LLM_TEMPERATURE", "0.3"),
                ("IQAIR_API_KEY", "iq"),
                ("WEATHER_API_KEY", "owm"),
                ("WEATHER_CITY", "New York"),
                ("WEATHER_COUNTRY", "us"),
                ("WEATHER_UNITS", "imperial"),
                ("WEATHER_CHECK_INTERVAL", "5"),
                ("PORT", "9090"),
            ]))
            .unwrap();

        assert_eq!(
            config.llm.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("sk-test".to_string())
        );
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o-mini"));
        assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.location.city, "New York");
        assert_eq!(config.location.country.as_deref(), Some("us"));
        assert_eq!(config.location.units, UnitSystem::Imperial);
        assert_eq!(config.updater.interval_minutes, 5);
        assert_eq!(config.server.port, 9090);

        let air_quality = config.air_quality.to_client_config();
        assert!(air_quality.iqair_enabled());
        assert!(air_quality.openweathermap_enabled());
    }

    #[test]
    fn legacy_env_log_file() {
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(lookup(&[
                ("WEATHER_LOG_TO_FILE", "TRUE"),
                ("WEATHER_LOG_FILE", "/var/log/weather-agent.log"),
            ]))
            .unwrap();
        assert!(config.telemetry.log_to_file);
        assert_eq!(
            config.telemetry.log_file,
            PathBuf::from("/var/log/weather-agent.log")
        );

        config
            .apply_legacy_env(lookup(&[("WEATHER_LOG_TO_FILE", "yes")]))
            .unwrap();
        assert!(!config.telemetry.log_to_file);

        config
            .apply_legacy_env(lookup(&[("WEATHER_LOG_TO_FILE", "1")]))
            .unwrap();
        assert!(config.telemetry.log_to_file);
    }

    #[test]
    fn command_line_location_wins_over_environment() {
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(lookup(&[("WEATHER_CITY", "Berlin"), ("WEATHER_COUNTRY", "de")]))
            .unwrap();
        LocationOverride::new(Some("Paris".to_string()), Some("fr".to_string()))
            .apply(&mut config.location);
        assert_eq!(config.location.city, "Paris");
        assert_eq!(config.location.country.as_deref(), Some("fr"));

        LocationOverride::new(Some("Lyon".to_string()), None).apply(&mut config.location);
        assert_eq!(config.location.city, "Lyon");
        assert_eq!(config.location.country.as_deref(), Some("fr"));
    }

    #[test]
    fn legacy_env_ignores_blank_values() {
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(lookup(&[("WEATHER_CITY", "  "), ("PORT", "")]))
            .unwrap();
        assert_eq!(config.location.city, "London");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn legacy_env_rejects_unparseable_values() {
        let mut config = AppConfig::default();
        let result = config.apply_legacy_env(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = config.apply_legacy_env(lookup(&[("WEATHER_UNITS", "kelvin")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = config.apply_legacy_env(lookup(&[("LLM_PROVIDER", "mistral")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_llm_key_is_fatal() {
        let result = AppConfig::default().validate();
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("LLM API key")));
    }

    #[test]
    fn missing_air_quality_keys_are_not_fatal() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn zero_interval_is_invalid() {
        let mut config = valid_config();
        config.updater.interval_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_is_invalid() {
        let mut config = valid_config();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_from_toml_sections() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 3000
                log_format = "json"

                [location]
                city = "Paris"
                country = "fr"

                [updater]
                interval_minutes = 15

                [telemetry]
                log_to_file = true
                log_file = "agent.log"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.location.city, "Paris");
        assert_eq!(config.updater.interval_minutes, 15);
        assert_eq!(config.llm.max_tokens, 500);
        assert!(config.telemetry.log_to_file);
        assert_eq!(config.telemetry.log_file, PathBuf::from("agent.log"));
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(
            &path,
            "[location]\ncity = \"Oslo\"\nunits = \"imperial\"\n\n[llm]\nprovider = \"openai\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.location.city, "Oslo");
        assert_eq!(config.location.units, UnitSystem::Imperial);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.location.city, "London");
    }

    #[test]
    fn serialized_config_has_no_secrets() {
        let config = valid_config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-ant-test"));
    }
}

//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the configured filter when set. With
//! `log_to_file` enabled, events also go to an append-mode file alongside
//! stdout.

use std::{
    fs::{File, OpenOptions},
    io,
    sync::Mutex,
};

use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, TelemetryAppConfig};

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The configured filter directive is malformed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Build the level filter, preferring `RUST_LOG`
pub fn build_env_filter(config: &TelemetryAppConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.log_filter.clone(),
        reason: e.to_string(),
    })
}

/// Open the log file for appending, or `None` when file logging is off
///
/// # Errors
///
/// Returns the I/O error when the file cannot be created or opened.
fn open_log_file(config: &TelemetryAppConfig) -> io::Result<Option<Mutex<File>>> {
    if !config.log_to_file {
        return Ok(None);
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    Ok(Some(Mutex::new(file)))
}

/// Install the global subscriber with a text or JSON formatter
///
/// A log file that cannot be opened is reported once and logging carries
/// on to stdout only.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber
/// is already installed.
pub fn init_telemetry(config: &TelemetryAppConfig, format: LogFormat) -> Result<(), TelemetryError> {
    let env_filter = build_env_filter(config)?;
    let (log_file, file_error) = match open_log_file(config) {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer().with_target(true);
            let file_layer = log_file.map(|file| {
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file)
            });
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;
        },
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true);
            let file_layer = log_file.map(|file| {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(file)
            });
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;
        },
    }

    if let Some(e) = file_error {
        warn!(
            path = %config.log_file.display(),
            error = %e,
            "Could not open log file, logging to stdout only"
        );
    }
    info!(format = %format, to_file = config.log_to_file, "Telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(path: std::path::PathBuf) -> TelemetryAppConfig {
        TelemetryAppConfig {
            log_to_file: true,
            log_file: path,
            ..TelemetryAppConfig::default()
        }
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(&TelemetryAppConfig::default().log_filter).is_ok());
    }

    #[test]
    fn malformed_filter_is_reported() {
        let config = TelemetryAppConfig {
            log_filter: "weather_agent=loud[".to_string(),
            ..TelemetryAppConfig::default()
        };
        if std::env::var("RUST_LOG").is_err() {
            let result = build_env_filter(&config);
            assert!(matches!(result, Err(TelemetryError::InvalidFilter { .. })));
        }
    }

    #[test]
    fn log_file_disabled_by_default() {
        assert!(open_log_file(&TelemetryAppConfig::default()).unwrap().is_none());
    }

    #[test]
    fn log_file_is_appended_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.log");
        std::fs::write(&path, "earlier line\n").unwrap();

        let file = open_log_file(&file_config(path.clone())).unwrap().unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(file));
        tracing::subscriber::with_default(subscriber, || {
            info!(city = "Paris", "Weather update published");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert!(contents.contains("Weather update published"));
        assert!(contents.contains("city=\"Paris\""));
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("weather.log");
        assert!(open_log_file(&file_config(path)).is_err());
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryAppConfig::default();
        let _ = init_telemetry(&config, LogFormat::Text);
        assert!(matches!(
            init_telemetry(&config, LogFormat::Json),
            Err(TelemetryError::Init(_))
        ));
    }
}

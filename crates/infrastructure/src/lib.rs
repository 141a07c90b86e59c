//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the integration clients and
//! carries configuration loading, telemetry setup and pipeline wiring.

pub mod adapters;
pub mod config;
pub mod pipeline;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AirQualityAppConfig, AppConfig, ConfigError, LlmAppConfig, LocationAppConfig,
    LocationOverride, LogFormat, ServerConfig, TelemetryAppConfig, UpdaterConfig,
};
pub use pipeline::{build_active_location, build_aqi_resolver, build_update_service};
pub use telemetry::{TelemetryError, init_telemetry};

//! Weather agent HTTP presentation layer
//!
//! Serves the latest published report, accepts location changes and runs
//! the periodic updater.

pub mod cli;
pub mod config_reload;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod tasks;

pub use cli::Cli;
pub use config_reload::{ReloadableConfig, forward_location_change, spawn_config_reload_handler};
pub use error::ApiError;
pub use routes::{create_router, with_middleware};
pub use state::AppState;
pub use tasks::spawn_weather_updater;

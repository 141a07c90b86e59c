//! Application state shared across handlers

use std::sync::Arc;

use application::{ActiveLocation, SnapshotStore, WeatherUpdateService};

use crate::config_reload::ReloadableConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Update pipeline, also used for on-demand refreshes
    pub update_service: Arc<WeatherUpdateService>,
    /// Latest published report
    pub store: Arc<SnapshotStore>,
    pub active_location: Arc<ActiveLocation>,
    pub config: ReloadableConfig,
}

impl AppState {
    /// State sharing the service's store and active location
    #[must_use]
    pub fn new(update_service: Arc<WeatherUpdateService>, config: ReloadableConfig) -> Self {
        Self {
            store: Arc::clone(update_service.store()),
            active_location: Arc::clone(update_service.active_location()),
            update_service,
            config,
        }
    }
}

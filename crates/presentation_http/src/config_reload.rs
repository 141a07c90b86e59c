//! Hot-reloadable configuration support
//!
//! SIGHUP re-reads the configuration sources. A changed `[location]`
//! section is forwarded to the [`ActiveLocation`], so the next update tick
//! picks it up without a restart.

use std::sync::Arc;

use application::ActiveLocation;
use arc_swap::ArcSwap;
use infrastructure::{AppConfig, ConfigError, LocationAppConfig, LocationOverride};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// A wrapper around `AppConfig` that supports atomic reload via SIGHUP
#[derive(Debug, Clone)]
pub struct ReloadableConfig {
    inner: Arc<ArcSwap<AppConfig>>,
    /// Command-line location, re-applied on every reload
    location_override: LocationOverride,
    /// Notifier for config change events
    notify: watch::Sender<u64>,
    /// Receiver for config change events
    receiver: watch::Receiver<u64>,
}

impl ReloadableConfig {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let (notify, receiver) = watch::channel(0);
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(config))),
            location_override: LocationOverride::default(),
            notify,
            receiver,
        }
    }

    /// Keep a command-line location across reloads
    #[must_use]
    pub fn with_location_override(mut self, location_override: LocationOverride) -> Self {
        self.location_override = location_override;
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn load(&self) -> Arc<AppConfig> {
        self.inner.load_full()
    }

    /// Swap in a new configuration and notify subscribers
    ///
    /// Returns the previous configuration.
    pub fn replace(&self, config: AppConfig) -> Arc<AppConfig> {
        let previous = self.inner.swap(Arc::new(config));
        let version = *self.notify.borrow() + 1;
        if self.notify.send(version).is_err() {
            warn!("No config change receivers active");
        }
        previous
    }

    /// Reload configuration from its sources
    ///
    /// # Errors
    ///
    /// Returns an error, keeping the current configuration, when loading or
    /// validation fails.
    pub fn reload(&self) -> Result<Arc<AppConfig>, ConfigError> {
        let config = AppConfig::load_with_override(&self.location_override)?;
        self.validate_and_replace(config)
    }

    fn validate_and_replace(&self, config: AppConfig) -> Result<Arc<AppConfig>, ConfigError> {
        config.validate()?;
        Ok(self.replace(config))
    }

    /// Subscribe to configuration change notifications
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }
}

/// Push a changed `[location]` section into the active location
///
/// Returns whether anything was applied.
pub fn forward_location_change(
    previous: &LocationAppConfig,
    current: &LocationAppConfig,
    active: &ActiveLocation,
) -> bool {
    let mut changed = false;

    if previous.city != current.city || previous.country != current.country {
        match active.set(current.city.clone(), current.country.clone()) {
            Ok(setting) => {
                info!(city = %setting.city, version = setting.version, "Active location reloaded");
                changed = true;
            },
            Err(e) => warn!(error = %e, "Reloaded location rejected, keeping current"),
        }
    }

    if previous.units != current.units {
        let setting = active.set_units(current.units);
        info!(units = %setting.units, version = setting.version, "Unit system reloaded");
        changed = true;
    }

    changed
}

fn reload_and_forward(config: &ReloadableConfig, location: &ActiveLocation) {
    match config.reload() {
        Ok(previous) => {
            let current = config.load();
            forward_location_change(&previous.location, &current.location, location);
            info!("Configuration reload complete");
        },
        Err(e) => {
            error!(error = %e, "Configuration reload failed, keeping previous config");
        },
    }
}

/// Spawn a background task that listens for SIGHUP and reloads configuration
#[cfg(unix)]
pub fn spawn_config_reload_handler(
    config: ReloadableConfig,
    location: Arc<ActiveLocation>,
) -> ReloadableConfig {
    use tokio::signal::unix::{SignalKind, signal};

    let config_clone = config.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGHUP handler: {}", e);
                return;
            },
        };

        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading configuration");
            reload_and_forward(&config_clone, &location);
        }
    });

    config
}

/// No-op on non-Unix systems
#[cfg(not(unix))]
pub fn spawn_config_reload_handler(
    config: ReloadableConfig,
    _location: Arc<ActiveLocation>,
) -> ReloadableConfig {
    warn!("SIGHUP config reload not supported on this platform");
    config
}

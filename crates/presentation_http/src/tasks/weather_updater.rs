//! Periodic weather update task
//!
//! Drives the update pipeline on a fixed schedule. Each tick reads the
//! active location afresh; ticks never overlap because the service
//! serializes runs and the ticker delays instead of bursting.

use std::sync::Arc;

use application::WeatherUpdateService;
use infrastructure::UpdaterConfig;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn the periodic updater
///
/// Returns a `JoinHandle` that can be used to abort the task when shutting
/// down.
pub fn spawn_weather_updater(
    service: Arc<WeatherUpdateService>,
    config: &UpdaterConfig,
) -> tokio::task::JoinHandle<()> {
    let interval = config.interval();
    let run_on_startup = config.run_on_startup;

    info!(
        interval_secs = interval.as_secs(),
        run_on_startup, "Starting weather updater"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !run_on_startup {
            // The first tick completes immediately
            ticker.tick().await;
        }

        loop {
            ticker.tick().await;

            let version = service.active_location().current().version;
            debug!(location_version = version, "Running scheduled update");

            match service.trigger_update(None).await {
                Ok(published) => {
                    debug!(city = %published.city(), "Scheduled update complete");
                },
                Err(e) => {
                    debug!(error = %e, "Scheduled update aborted, retrying next tick");
                },
            }
        }
    })
}

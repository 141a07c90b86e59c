//! Weather update pipeline
//!
//! One run resolves the place, fetches current conditions and air quality,
//! seals a snapshot, composes the message and publishes the result. Runs are
//! serialized by an async mutex shared by the scheduler and on-demand
//! triggers.

use std::{fmt, sync::Arc};

use domain::{DaylightBasis, GeoLocation, SnapshotHistory, WeatherSnapshot};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use super::{
    active_location::ActiveLocation,
    aqi_resolver::AqiResolver,
    location_resolver::LocationResolver,
    message_composer::MessageComposer,
    snapshot_store::{PublishedSnapshot, SnapshotStore},
};
use crate::{error::ApplicationError, ports::WeatherPort};

/// State carried from one run to the next
#[derive(Debug, Default)]
struct PipelineState {
    history: SnapshotHistory,
    last_message: Option<String>,
}

/// Runs the update pipeline
pub struct WeatherUpdateService {
    location: Arc<ActiveLocation>,
    resolver: LocationResolver,
    weather: Arc<dyn WeatherPort>,
    aqi: AqiResolver,
    composer: MessageComposer,
    store: Arc<SnapshotStore>,
    state: Mutex<PipelineState>,
}

impl fmt::Debug for WeatherUpdateService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherUpdateService")
            .field("location", &self.location)
            .field("resolver", &self.resolver)
            .field("aqi", &self.aqi)
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}

impl WeatherUpdateService {
    pub fn new(
        location: Arc<ActiveLocation>,
        resolver: LocationResolver,
        weather: Arc<dyn WeatherPort>,
        aqi: AqiResolver,
        composer: MessageComposer,
        store: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            location,
            resolver,
            weather,
            aqi,
            composer,
            store,
            state: Mutex::new(PipelineState::default()),
        }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    pub fn active_location(&self) -> &Arc<ActiveLocation> {
        &self.location
    }

    /// Number of snapshots in the rolling history
    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    /// Run the pipeline once
    ///
    /// With `anchor`, the place is named by reverse geocoding those
    /// coordinates; otherwise the active location is forward geocoded.
    /// The previous publication stays visible when the run fails.
    ///
    /// # Errors
    ///
    /// Returns an error when the weather fetch or the first generation fails.
    #[instrument(skip(self), fields(anchored = anchor.is_some()))]
    pub async fn trigger_update(
        &self,
        anchor: Option<GeoLocation>,
    ) -> Result<Arc<PublishedSnapshot>, ApplicationError> {
        let mut state = self.state.lock().await;
        let setting = self.location.current();

        let place = match anchor {
            Some(location) => self.resolver.reverse_resolve(location).await,
            None => self.resolver.resolve(&setting.query()).await,
        };
        let location = place.location();

        let observation = self
            .weather
            .fetch_observation(&location, setting.units)
            .await
            .inspect_err(|e| {
                error!(
                    city = %place.name(),
                    lat = %location.latitude(),
                    lon = %location.longitude(),
                    error = %e,
                    "Weather fetch failed, update aborted"
                );
            })?;

        let aqi = self.aqi.resolve(&location).await;
        let snapshot = Arc::new(WeatherSnapshot::assemble(place, observation, aqi));
        if snapshot.daylight_basis() == DaylightBasis::FixedWindow {
            warn!(
                city = %snapshot.place().name(),
                "Sunrise/sunset unavailable, day/night from fixed 06:00-20:00 window"
            );
        }

        state.history.push(Arc::clone(&snapshot));

        let message = self
            .composer
            .compose(&snapshot, &state.history, state.last_message.as_deref())
            .await
            .inspect_err(|e| {
                error!(city = %snapshot.place().name(), error = %e, "Message generation failed, update not published");
            })?;

        state.last_message = Some(message.text.clone());
        let published = self.store.publish(PublishedSnapshot::new(snapshot, message));

        info!(
            city = %published.city(),
            country = %published.country(),
            outcome = ?published.message.outcome,
            location_version = setting.version,
            history = state.history.len(),
            "Weather update published"
        );
        Ok(published)
    }
}

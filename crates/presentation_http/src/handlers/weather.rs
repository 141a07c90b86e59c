//! Weather report handler

use application::ReportDocument;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use domain::GeoLocation;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Optional coordinate anchor for an on-demand update
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl WeatherQuery {
    /// Validated anchor, if both coordinates were given
    fn anchor(&self) -> Result<Option<GeoLocation>, ApiError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => GeoLocation::new(lat, lon)
                .map(Some)
                .map_err(|e| ApiError::BadRequest(e.to_string())),
            (None, None) => Ok(None),
            _ => Err(ApiError::BadRequest(
                "Both lat and lon are required for a coordinate lookup".to_string(),
            )),
        }
    }
}

/// Latest published weather report
///
/// GET /api/weather[?lat=..&lon=..]
#[instrument(skip(state, query))]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<ReportDocument>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(anchor) = query.anchor()? {
        info!(lat = anchor.latitude(), lon = anchor.longitude(), "On-demand update requested");
        let published = state.update_service.trigger_update(Some(anchor)).await?;
        return Ok(Json(published.to_document()));
    }

    if let Some(latest) = state.store.latest() {
        return Ok(Json(latest.to_document()));
    }

    info!("No report published yet, running an update");
    match state.update_service.trigger_update(None).await {
        Ok(published) => Ok(Json(published.to_document())),
        Err(e) => {
            warn!(error = %e, "Initial update failed");
            Err(ApiError::ServiceUnavailable(e.to_string()))
        },
    }
}

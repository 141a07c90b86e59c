//! Active location handler
//!
//! Points the agent at a new city. The refresh runs in the background so
//! the caller is not held up by upstream providers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{error::ApiError, extract::JsonOrForm, state::AppState};

/// Request body for changing the active location
#[derive(Debug, Deserialize)]
pub struct SetLocationRequest {
    pub city: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// The location now in effect
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    pub city: String,
    pub country: Option<String>,
    pub version: u64,
}

/// Set the active location
///
/// POST /api/location (JSON or form body)
#[instrument(skip_all)]
pub async fn set_location(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<SetLocationRequest>,
) -> Result<Json<LocationResponse>, ApiError> {
    let setting = state.active_location.set(request.city, request.country)?;

    info!(city = %setting.city, version = setting.version, "Location updated, refreshing in background");

    let service = state.update_service.clone();
    tokio::spawn(async move {
        if let Err(e) = service.trigger_update(None).await {
            warn!(error = %e, "Background refresh after location change failed");
        }
    });

    Ok(Json(LocationResponse {
        city: setting.city,
        country: setting.country_code,
        version: setting.version,
    }))
}

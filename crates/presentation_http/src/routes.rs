//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/weather", get(handlers::weather::get_weather))
        .route("/api/location", post(handlers::location::set_location))
        .with_state(state)
}

/// Wrap a router with request tracing and, when enabled, CORS
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let router = match cors_layer(server) {
        Some(cors) => router.layer(cors),
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}

/// CORS policy from the server config; `None` when disabled
#[must_use]
pub fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    if server.allowed_origins.is_empty() {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_yields_no_layer() {
        let server = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        assert!(cors_layer(&server).is_none());
    }

    #[test]
    fn cors_enabled_by_default() {
        assert!(cors_layer(&ServerConfig::default()).is_some());
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let server = ServerConfig {
            allowed_origins: vec!["https://example.com".to_string(), "bad\norigin".to_string()],
            ..ServerConfig::default()
        };
        assert!(cors_layer(&server).is_some());
    }
}

//! Weather agent HTTP server
//!
//! Main entry point: loads configuration, starts the periodic updater and
//! serves the HTTP API. Optional positional arguments override the city and
//! country.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::SnapshotStore;
use clap::Parser;
use infrastructure::{AppConfig, build_active_location, build_update_service, init_telemetry};
use presentation_http::{
    Cli, ReloadableConfig, routes, spawn_config_reload_handler, spawn_weather_updater,
    state::AppState,
};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let location_override = cli.location_override();
    let config =
        AppConfig::load_with_override(&location_override).context("Failed to load configuration")?;

    init_telemetry(&config.telemetry, config.server.log_format)
        .context("Failed to initialize logging")?;

    info!("Weather agent v{} starting", env!("CARGO_PKG_VERSION"));

    config.validate().context("Invalid configuration")?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        city = %config.location.city,
        units = %config.location.units,
        provider = %config.llm.provider,
        interval_minutes = config.updater.interval_minutes,
        "Configuration loaded"
    );

    let location = build_active_location(&config)?;
    let store = Arc::new(SnapshotStore::new());
    let service = Arc::new(build_update_service(
        &config,
        Arc::clone(&location),
        store,
    )?);

    let reloadable_config = spawn_config_reload_handler(
        ReloadableConfig::new(config.clone()).with_location_override(location_override),
        location,
    );

    let updater = spawn_weather_updater(Arc::clone(&service), &config.updater);

    let state = AppState::new(service, reloadable_config);
    let app = routes::with_middleware(routes::create_router(state), &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown = Arc::new(Notify::new());
    let server = {
        let shutdown = Arc::clone(&shutdown);
        axum::serve(listener, app).with_graceful_shutdown(async move {
            shutdown.notified().await;
        })
    };
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            updater.abort();
            result.context("Server task panicked")??;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    updater.abort();
    shutdown.notify_one();

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    info!("Waiting up to {:?} for connections to close", timeout);

    match tokio::time::timeout(timeout, server).await {
        Ok(Ok(Ok(()))) => info!("Server shutdown complete"),
        Ok(Ok(Err(e))) => error!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => error!(error = %e, "Server task failed during shutdown"),
        Err(_) => warn!("Shutdown timeout elapsed, dropping open connections"),
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

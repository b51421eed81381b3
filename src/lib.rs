//! Space Weather Monitor
//!
//! Periodically pulls space weather telemetry from the NOAA SWPC feeds,
//! normalizes and classifies each indicator, and serves the aggregated
//! snapshot to a dashboard over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod services;
pub mod sources;
pub mod state;
pub mod store;

use api::ApiServer;
use config::AppConfig;
use error::Result;
use scheduler::RefreshScheduler;
use services::SnapshotService;
use sources::{HttpTransport, SourceClient};
use state::AppState;
use std::sync::Arc;
use store::SnapshotStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spaceweather_monitor_lib=debug,spaceweather_monitor=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the monitor until Ctrl-C
pub async fn run(config: AppConfig) -> Result<()> {
    tracing::info!("Starting Space Weather Monitor...");
    tracing::info!(
        "Sources: {} (timeout {}s), refresh every {}s",
        config.base_url,
        config.request_timeout.as_secs(),
        config.refresh_interval.as_secs()
    );

    let transport = Arc::new(HttpTransport::new(config.request_timeout)?);
    let client = SourceClient::new(transport, &config.base_url, config.request_timeout)?;
    let service = Arc::new(SnapshotService::new(client));
    let store = Arc::new(SnapshotStore::open(&config.snapshot_path));

    let scheduler = RefreshScheduler::new(service, store.clone(), config.refresh_interval);
    let app_state = Arc::new(AppState::new(store, scheduler.handle(), config.index_path.clone()));
    let refresh_task = scheduler.start();

    let mut server = ApiServer::new(app_state);
    server.start(&config.host, config.port).await?;

    tracing::info!("Application state initialized");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    server.stop();
    refresh_task.abort();

    Ok(())
}

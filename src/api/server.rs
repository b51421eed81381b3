//! HTTP server for the snapshot API

use crate::api::handlers;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the API router
///
/// The snapshot directory is mounted under `/static`, so the persisted
/// document is also reachable as `/static/<file name>`.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(state.static_dir());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        .route("/api/weather-data", get(handlers::weather_data))
        .route("/api/update-data", post(handlers::update_data))
        .nest_service("/static", static_files)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Snapshot API server manager
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
        }
    }

    /// Bind `host:port` and serve in a background task
    pub async fn start(&mut self, host: &str, port: u16) -> Result<SocketAddr> {
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address {}:{}: {}", host, port, e)))?;

        let app = router(self.state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Server(format!("Failed to bind to {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        });

        info!("🌐 Space Weather API listening on http://{}", local_addr);
        info!("  GET  http://{}/api/weather-data", local_addr);
        info!("  GET  http://{}/api/status", local_addr);
        info!("  GET  http://{}/static/", local_addr);
        info!("  GET  http://{}/health", local_addr);
        info!("  POST http://{}/api/update-data", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

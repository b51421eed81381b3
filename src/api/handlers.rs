//! Snapshot API endpoint handlers

use crate::api::types::*;
use crate::services::snapshot::LAST_UPDATE_FORMAT;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

const INDEX_MISSING: &str = "<h1>Файл index.html не найден</h1>";

// ============================================================================
// Dashboard
// ============================================================================

/// Dashboard page - GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    match tokio::fs::read_to_string(&state.index_path).await {
        Ok(page) => Html(page),
        Err(e) => {
            debug!("Dashboard page {:?} unavailable: {}", state.index_path, e);
            Html(INDEX_MISSING.to_string())
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Latest snapshot - GET /api/weather-data
pub async fn weather_data(State(state): State<Arc<AppState>>) -> Response {
    match state.store.current() {
        Some(snapshot) => Json(snapshot.as_ref()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MissingDataResponse {
                error: "Данные не найдены".to_string(),
                last_update: state.store.last_update(),
            }),
        )
            .into_response(),
    }
}

/// Trigger an out-of-schedule refresh - POST /api/update-data
///
/// Answers immediately; the new snapshot becomes visible once the run
/// completes.
pub async fn update_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!("On-demand refresh requested");
    state.refresh.request();

    Json(UpdateResponse {
        status: "started".to_string(),
        message: "Обновление данных запущено".to_string(),
    })
}

// ============================================================================
// Status
// ============================================================================

/// Service status - GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "running".to_string(),
        data_available: state.store.has_data(),
        last_update: state.store.last_update(),
        server_time: Utc::now().format(LAST_UPDATE_FORMAT).to_string(),
    })
}

/// Liveness probe - GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

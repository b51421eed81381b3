//! API response bodies

use serde::{Deserialize, Serialize};

/// Body of `GET /api/weather-data` when no snapshot exists yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingDataResponse {
    pub error: String,
    pub last_update: String,
}

/// Body of `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub data_available: bool,
    pub last_update: String,
    pub server_time: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Body of `POST /api/update-data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    pub message: String,
}

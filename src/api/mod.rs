//! Snapshot API server module
//!
//! Provides:
//! - Latest snapshot document (`GET /api/weather-data`)
//! - Service status (`GET /api/status`) and liveness probe (`GET /health`)
//! - On-demand refresh trigger (`POST /api/update-data`)

mod server;
pub mod handlers;
mod types;

pub use server::{router, ApiServer};
pub use types::{HealthResponse, MissingDataResponse, StatusResponse, UpdateResponse};

//! Runtime configuration loaded from environment variables
//!
//! A `.env` file in the working directory is honoured. Every setting has a
//! default, so an empty environment yields a working configuration.

use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://services.swpc.noaa.gov/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REFRESH_SECS: u64 = 180;
const DEFAULT_SNAPSHOT_PATH: &str = "static/space_weather_data.json";
const DEFAULT_INDEX_PATH: &str = "templates/index.html";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL all NOAA feeds are resolved against
    pub base_url: Url,
    /// Upper bound for a single upstream call
    pub request_timeout: Duration,
    /// Interval between scheduled pipeline runs
    pub refresh_interval: Duration,
    /// Location of the persisted snapshot document
    pub snapshot_path: PathBuf,
    /// Dashboard page served at `/`
    pub index_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("NOAA_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => defaults.base_url,
        };

        let request_timeout = parse_secs(&lookup, "REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout);
        let refresh_interval = parse_secs(&lookup, "REFRESH_INTERVAL_SECS")?
            .unwrap_or(defaults.refresh_interval);

        let snapshot_path = lookup("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.snapshot_path);
        let index_path = lookup("INDEX_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.index_path);

        let host = lookup("SERVER_HOST").unwrap_or(defaults.host);
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT '{}': {}", raw, e)))?,
            None => defaults.port,
        };

        Ok(Self {
            base_url,
            request_timeout,
            refresh_interval,
            snapshot_path,
            index_path,
            host,
            port,
        })
    }
}

/// Parse a base URL, forcing a trailing slash so `Url::join` keeps the path
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| AppError::Config(format!("Invalid NOAA_BASE_URL '{}': {}", raw, e)))
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e)))?;

    if secs == 0 {
        return Err(AppError::Config(format!("{} must be greater than zero", key)));
    }

    Ok(Some(Duration::from_secs(secs)))
}

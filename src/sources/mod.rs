//! Upstream source client
//!
//! A [`SourceClient`] performs one bounded-time retrieval per call and yields
//! either the decoded payload or `None`. Transport errors, non-success status
//! codes, timeouts and decode failures are logged once and folded into `None`;
//! nothing is retried here.

pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::{AppError, Result, SourceError};
use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub use http::HttpTransport;
pub use types::Endpoint;

/// Raw byte retrieval from a URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the body of `url`, failing on any non-success status
    async fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, SourceError>;
}

/// Bounded-time, failure-folding access to the NOAA endpoints
#[derive(Clone)]
pub struct SourceClient {
    transport: Arc<dyn Transport>,
    urls: HashMap<Endpoint, Url>,
    timeout: Duration,
}

impl SourceClient {
    /// Resolve every endpoint against `base_url`
    pub fn new(transport: Arc<dyn Transport>, base_url: &Url, timeout: Duration) -> Result<Self> {
        let mut urls = HashMap::with_capacity(Endpoint::ALL.len());
        for endpoint in Endpoint::ALL {
            let url = base_url.join(endpoint.path()).map_err(|e| {
                AppError::Config(format!("Invalid URL for {}: {}", endpoint.name(), e))
            })?;
            urls.insert(endpoint, url);
        }

        Ok(Self {
            transport,
            urls,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and decode a JSON document
    pub async fn fetch_json(&self, endpoint: Endpoint) -> Option<Value> {
        let outcome = match self.fetch(endpoint).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(SourceError::from),
            Err(e) => Err(e),
        };
        Self::settle(endpoint, outcome)
    }

    /// Fetch a JSON document that must be an ordered list of samples
    pub async fn fetch_samples(&self, endpoint: Endpoint) -> Option<Vec<Value>> {
        match self.fetch_json(endpoint).await? {
            Value::Array(samples) => Some(samples),
            other => Self::settle(
                endpoint,
                Err(SourceError::Decode(format!(
                    "expected an array of samples, got {}",
                    json_kind(&other)
                ))),
            ),
        }
    }

    /// Fetch a binary resource and encode it as standard base64
    pub async fn fetch_base64(&self, endpoint: Endpoint) -> Option<String> {
        let outcome = self.fetch(endpoint).await;
        Self::settle(endpoint, outcome)
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    async fn fetch(&self, endpoint: Endpoint) -> std::result::Result<Vec<u8>, SourceError> {
        let url = self
            .urls
            .get(&endpoint)
            .ok_or_else(|| SourceError::Unavailable("endpoint not configured".to_string()))?;

        match tokio::time::timeout(self.timeout, self.transport.get(url)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.timeout)),
        }
    }

    fn settle<T>(endpoint: Endpoint, outcome: std::result::Result<T, SourceError>) -> Option<T> {
        match outcome {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(source = endpoint.name(), "⚠️ {}: {}", endpoint.name(), e);
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

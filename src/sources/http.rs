//! reqwest-backed transport

use super::Transport;
use crate::error::{Result, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("spaceweather-monitor/", env!("CARGO_PKG_VERSION"));

/// HTTP transport shared by every pipeline run
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client whose own timeout matches the per-call bound
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, SourceError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

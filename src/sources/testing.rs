//! In-memory transport for tests

use super::{Endpoint, SourceClient, Transport};
use crate::error::SourceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub(crate) const TEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
enum Canned {
    Body(Vec<u8>),
    Status(u16),
    Hang,
}

/// Serves canned responses keyed by endpoint; anything else is unavailable
#[derive(Clone, Default)]
pub(crate) struct StaticTransport {
    responses: HashMap<&'static str, Canned>,
}

impl StaticTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn json(self, endpoint: Endpoint, body: &str) -> Self {
        self.bytes(endpoint, body.as_bytes().to_vec())
    }

    pub(crate) fn bytes(mut self, endpoint: Endpoint, body: Vec<u8>) -> Self {
        self.responses.insert(endpoint.path(), Canned::Body(body));
        self
    }

    pub(crate) fn status(mut self, endpoint: Endpoint, code: u16) -> Self {
        self.responses.insert(endpoint.path(), Canned::Status(code));
        self
    }

    pub(crate) fn hang(mut self, endpoint: Endpoint) -> Self {
        self.responses.insert(endpoint.path(), Canned::Hang);
        self
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, SourceError> {
        let path = url.path().trim_start_matches('/');
        match self.responses.get(path).cloned() {
            Some(Canned::Body(body)) => Ok(body),
            Some(Canned::Status(code)) => Err(SourceError::Status(code)),
            Some(Canned::Hang) => std::future::pending().await,
            None => Err(SourceError::Unavailable("connection refused".to_string())),
        }
    }
}

pub(crate) fn client_with(transport: StaticTransport) -> SourceClient {
    let base = Url::parse("http://noaa.test/").expect("static test URL");
    SourceClient::new(Arc::new(transport), &base, TEST_TIMEOUT).expect("test endpoints resolve")
}

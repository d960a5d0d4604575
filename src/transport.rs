//! Transport seam between the client and the network
//!
//! The client only needs "send this GET, give me status and body". The
//! default [`HttpTransport`] wraps a blocking `reqwest` client, which owns
//! the connection pool and enforces the per-call timeout. Tests and callers
//! with their own HTTP stack can plug in any other [`Transport`].

use crate::request::OutboundRequest;
use crate::{ClientConfig, Error, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;

/// Status and unread body of a completed round trip
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Sends a GET request and returns once response headers have arrived.
///
/// Implementations report network failures as [`Error::Transport`] and
/// expired deadlines as [`Error::Timeout`]. They must not interpret the
/// status code.
pub trait Transport: Send + Sync {
    fn send(&self, request: &OutboundRequest) -> Result<TransportResponse>;
}

/// Default transport backed by `reqwest::blocking::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_ms: config.timeout_ms,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else if err.is_builder() {
            Error::RequestConstruction(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let req = builder.build().map_err(|e| self.map_error(e))?;
        let res = self.client.execute(req).map_err(|e| self.map_error(e))?;

        Ok(TransportResponse {
            status: res.status().as_u16(),
            body: Box::new(res),
        })
    }
}

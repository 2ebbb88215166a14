//! HTTP transport for the search pipeline.
//!
//! The pipeline talks to the network through the [`Transport`] trait so the
//! session layer can be exercised without sockets. [`HttpTransport`] is the
//! production implementation on top of `reqwest`.
//!
//! # Timeouts
//!
//! - Connect: 15 seconds ([`CONNECT_TIMEOUT`])
//! - Read: 10 seconds per read ([`READ_TIMEOUT`])
//!
//! Both are fixed; there is no per-call override.

use crate::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};
use url::Url;

/// How long to wait for the TCP/TLS connection to be established.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// How long any single read of the response may stall.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can GET a URL and hand back its body as text.
///
/// Implementations must only return a body for a 200 OK response; any other
/// status is reported as [`FetchError::NonOkStatus`] without reading the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the full body of a 200 OK response.
    async fn get_text(&self, url: &Url) -> Result<String>;
}

/// `reqwest`-backed transport with the fixed connect/read timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the underlying `reqwest` client.
    ///
    /// # Errors
    ///
    /// [`FetchError::Transport`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn get_text(&self, url: &Url) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Error response code"
            );
            return Err(FetchError::NonOkStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Whole body as UTF-8, line breaks intact.
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Read response body"
        );
        Ok(body)
    }
}

//! Pre-flight network check.
//!
//! The pipeline itself cannot tell "offline" from "no results": both end up as
//! an empty list. Hosts call a [`ConnectivityProbe`] before searching so they
//! can show the right message.

use crate::error::{FetchError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

/// Upper bound on a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Answers "is the network usable right now?".
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_connected(&self) -> bool;
}

/// Run `probe` and turn a negative answer into [`FetchError::NoConnectivity`].
///
/// # Arguments
///
/// * `probe` - The check to run before a search
///
/// # Returns
///
/// `Ok(())` when the search may go ahead, `Err(FetchError::NoConnectivity)`
/// when the host should show its offline state instead.
pub async fn ensure_connected(probe: &dyn ConnectivityProbe) -> Result<()> {
    if probe.is_connected().await {
        Ok(())
    } else {
        Err(FetchError::NoConnectivity)
    }
}

/// Probe that opens (and immediately drops) a TCP connection to the API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpProbe {
    host: String,
    port: u16,
}

impl TcpProbe {
    /// Probe an explicit `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Probe the host and port a request URL would connect to.
    ///
    /// # Arguments
    ///
    /// * `url` - Any URL on the endpoint, typically the configured base URL
    ///
    /// # Returns
    ///
    /// A probe for the URL's host and its explicit or scheme-default port, or
    /// the parse error when the URL has neither.
    pub fn for_url(url: &str) -> std::result::Result<Self, url::ParseError> {
        let parsed = Url::parse(url)?;
        let host = parsed.host_str().ok_or(url::ParseError::EmptyHost)?;
        let port = parsed
            .port_or_known_default()
            .ok_or(url::ParseError::InvalidPort)?;
        Ok(Self::new(host, port))
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_connected(&self) -> bool {
        let addr = (self.host.as_str(), self.port);
        match timeout(PROBE_TIMEOUT, TcpStream::connect(addr)).await {
            Ok(Ok(_)) => {
                debug!(host = %self.host, port = self.port, "Connectivity probe succeeded");
                true
            }
            Ok(Err(e)) => {
                warn!(host = %self.host, port = self.port, error = %e, "Connectivity probe failed");
                false
            }
            Err(_) => {
                warn!(host = %self.host, port = self.port, "Connectivity probe timed out");
                false
            }
        }
    }
}

/// Probe with a fixed answer, for hosts that already know their network state.
#[derive(Debug, Clone, Copy)]
pub struct AssumeConnected(pub bool);

#[async_trait]
impl ConnectivityProbe for AssumeConnected {
    async fn is_connected(&self) -> bool {
        self.0
    }
}

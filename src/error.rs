//! Failure taxonomy for the fetch-and-parse pipeline.
//!
//! Every variant maps to one failure domain of the pipeline. The public
//! entry points in [`crate::pipeline`] never return these to the caller;
//! they log them where they occur and degrade to an empty or partial list.
//! [`crate::pipeline::NewsClient::try_fetch_body`] is the one place that
//! exposes them, for hosts that want to tell failures apart.

use thiserror::Error;

/// Result alias used inside the pipeline.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Everything that can go wrong between a search phrase and a list of records.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be parsed.
    #[error("malformed request URL {url:?}: {source}")]
    UrlMalformed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// DNS, refused connection, TLS, timeout or a broken body stream.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("unexpected HTTP status {status} from {url}")]
    NonOkStatus { status: u16, url: String },

    /// The body is not JSON at all.
    #[error("response body is not valid JSON: {0}")]
    JsonSyntax(#[from] serde_json::Error),

    /// The body is JSON but not shaped like `{ response: { results: [...] } }`.
    #[error("unexpected JSON structure: {0}")]
    JsonStructure(String),

    /// The caller's pre-flight check found no network.
    #[error("no network connectivity")]
    NoConnectivity,
}

impl FetchError {
    /// True when the transport gave up because a connect or read deadline passed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_timeout())
    }

    /// HTTP status carried by a [`FetchError::NonOkStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::NonOkStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

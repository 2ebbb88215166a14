//! Endpoint configuration for the Guardian search API.
//!
//! The host decides where requests go and whether an API key is attached.
//! Nothing here is read from disk; the bundled binary fills a [`NewsConfig`]
//! from command-line flags and environment variables.

/// Search endpoint, including the `?` that starts the query string.
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search?";

/// Parameter prefix placed in front of the search term.
pub const DEFAULT_QUERY_PREFIX: &str = "q=";

/// Term searched for when the user supplies none.
pub const DEFAULT_QUERY: &str = "android";

/// Name of the query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api-key";

/// Where and how search requests are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    /// Base endpoint, ending with `?` so parameters can follow directly.
    pub base_url: String,
    /// Prefix written between the base URL and the search term.
    pub query_prefix: String,
    /// Search term used when the query is absent or blank.
    pub default_query: String,
    /// Optional key appended as `&api-key=...`.
    pub api_key: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query_prefix: DEFAULT_QUERY_PREFIX.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            api_key: None,
        }
    }
}

impl NewsConfig {
    /// Same defaults, different endpoint. Used to point the client at a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Attach an API key, ignoring blank values.
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }
}

//! Request builder: turns a raw search phrase into a fully-qualified URL.

use crate::config::{API_KEY_PARAM, NewsConfig};

/// Build a request URL against the default Guardian endpoint.
///
/// Whitespace inside the phrase becomes `+`. An absent or blank phrase is
/// replaced by the default term. Nothing else is escaped.
///
/// ```
/// use guardian_news::request::build_request_url;
///
/// assert_eq!(
///     build_request_url(Some("android game")),
///     "https://content.guardianapis.com/search?q=android+game"
/// );
/// assert_eq!(
///     build_request_url(None),
///     "https://content.guardianapis.com/search?q=android"
/// );
/// ```
pub fn build_request_url(query: Option<&str>) -> String {
    RequestBuilder::default().build_request_url(query)
}

/// Request builder bound to a particular [`NewsConfig`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    config: NewsConfig,
}

impl RequestBuilder {
    /// Create a builder that addresses requests per `config`.
    pub fn new(config: NewsConfig) -> Self {
        Self { config }
    }

    /// Build the URL for `query`. Pure, never fails.
    ///
    /// # Arguments
    ///
    /// * `query` - The raw search phrase; `None`, empty or whitespace-only
    ///   selects the configured default term
    ///
    /// # Returns
    ///
    /// `base_url` + `query_prefix` + the `+`-joined phrase, followed by
    /// `&api-key=...` when a key is configured.
    pub fn build_request_url(&self, query: Option<&str>) -> String {
        let term = query
            .map(join_terms)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.config.default_query.clone());

        let mut url = format!("{}{}{}", self.config.base_url, self.config.query_prefix, term);
        if let Some(key) = &self.config.api_key {
            url.push('&');
            url.push_str(API_KEY_PARAM);
            url.push('=');
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

/// Collapse every whitespace run to a single `+`.
fn join_terms(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join("+")
}

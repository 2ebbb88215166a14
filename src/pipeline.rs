//! Fetch-and-parse pipeline.
//!
//! [`NewsClient`] ties the pieces together:
//!
//! 1. **URL check**: parse the request string, malformed → empty result
//! 2. **Transport**: GET with fixed timeouts, only 200 OK bodies are read
//! 3. **Decode**: walk `response.results` into [`ArticleRecord`]s
//!
//! Each step logs its own failure and the pipeline degrades to an empty (or,
//! for decode errors mid-array, partial) list. Nothing is retried.

use crate::config::NewsConfig;
use crate::decode::decode_articles;
use crate::error::{FetchError, Result};
use crate::models::ArticleRecord;
use crate::request::RequestBuilder;
use crate::transport::{HttpTransport, Transport};
use std::time::Instant;
use tracing::{error, info, instrument};
use url::Url;

/// Search client over some [`Transport`].
#[derive(Debug, Clone)]
pub struct NewsClient<T = HttpTransport> {
    transport: T,
    requests: RequestBuilder,
}

impl NewsClient<HttpTransport> {
    /// Client on the real network with the given endpoint configuration.
    pub fn new(config: NewsConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?, config))
    }
}

impl<T: Transport> NewsClient<T> {
    /// Client over an explicit transport, e.g. an in-memory one in tests.
    pub fn with_transport(transport: T, config: NewsConfig) -> Self {
        Self {
            transport,
            requests: RequestBuilder::new(config),
        }
    }

    /// The request builder this client uses for [`NewsClient::search`].
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Build the request URL for `query` and fetch it.
    ///
    /// # Arguments
    ///
    /// * `query` - The raw search phrase, or `None` for the default term
    ///
    /// # Returns
    ///
    /// The decoded records in response order; empty on any failure.
    pub async fn search(&self, query: Option<&str>) -> Vec<ArticleRecord> {
        let url = self.requests.build_request_url(query);
        self.fetch_articles(&url).await
    }

    /// Fetch `url` and decode the body. Never fails; see the module docs.
    ///
    /// # Arguments
    ///
    /// * `url` - A fully-qualified request URL, usually from [`RequestBuilder`]
    ///
    /// # Returns
    ///
    /// Every record decoded, in input order. Empty when the URL is malformed,
    /// the transport fails, the status is not 200 or the body is blank or
    /// unparseable; partial when decoding stops partway through the array.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_articles(&self, url: &str) -> Vec<ArticleRecord> {
        let t0 = Instant::now();
        let body = match self.try_fetch_body(url).await {
            Ok(body) => body,
            Err(e) => {
                error!(
                    error = %e,
                    timeout = e.is_timeout(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Problem retrieving the news JSON results"
                );
                return Vec::new();
            }
        };

        let articles = decode_articles(&body);
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched news results"
        );
        articles
    }

    /// Steps 1 and 2 only, with the failure reported instead of swallowed.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UrlMalformed`] if `url` does not parse
    /// - [`FetchError::Transport`] on connection, timeout or body-read failure
    /// - [`FetchError::NonOkStatus`] for any status other than 200
    pub async fn try_fetch_body(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|source| FetchError::UrlMalformed {
            url: url.to_string(),
            source,
        })?;
        self.transport.get_text(&parsed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    const FIXTURE: &str = r#"{"response": {"status": "ok", "results": [
        {"sectionName": "Technology", "webPublicationDate": "2024-10-15T06:00:10Z",
         "webTitle": "Android 15 review", "webUrl": "https://www.theguardian.com/a"},
        {"sectionName": "Games", "webPublicationDate": "2024-10-14T12:30:00Z",
         "webTitle": "The best Android games", "webUrl": "https://www.theguardian.com/b"},
        {"webPublicationDate": "2024-10-13T09:00:00Z",
         "webTitle": "Google antitrust ruling", "webUrl": "https://www.theguardian.com/c"}
    ]}}"#;

    async fn client_for(server: &MockServer) -> NewsClient {
        let config = NewsConfig::with_base_url(format!("{}/search?", server.uri()));
        NewsClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_search_decodes_fixture_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "android game"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let articles = client.search(Some("android game")).await;

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title.as_deref(), Some("Android 15 review"));
        assert_eq!(articles[1].title.as_deref(), Some("The best Android games"));
        assert_eq!(articles[2].title.as_deref(), Some("Google antitrust ruling"));
        assert!(articles[2].section.is_none());
        assert_eq!(articles[2].url.as_deref(), Some("https://www.theguardian.com/c"));
    }

    #[tokio::test]
    async fn test_default_query_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "android"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.search(None).await.len(), 3);
    }

    #[tokio::test]
    async fn test_error_status_yields_empty() {
        for code in [404u16, 500] {
            let server = MockServer::start().await;
            // A valid body behind an error status must never be decoded.
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(code).set_body_string(FIXTURE))
                .mount(&server)
                .await;

            let client = client_for(&server).await;
            assert!(client.search(Some("android")).await.is_empty());

            let url = client.requests().build_request_url(Some("android"));
            let err = client.try_fetch_body(&url).await.unwrap_err();
            assert_eq!(err.status(), Some(code));
        }
    }

    #[tokio::test]
    async fn test_error_status_is_logged_with_code() {
        for code in [404u16, 500] {
            let logs = LogBuffer::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(logs.clone())
                .with_ansi(false)
                .finish();
            let _guard = tracing::subscriber::set_default(subscriber);

            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(code).set_body_string(FIXTURE))
                .mount(&server)
                .await;

            let client = client_for(&server).await;
            assert!(client.search(None).await.is_empty());

            let output = logs.contents();
            assert!(
                output.contains(&format!("status={code}")),
                "log output: {output}"
            );
            assert!(output.contains("Error response code"), "log output: {output}");
        }
    }

    #[tokio::test]
    async fn test_blank_body_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("   \n"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.search(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"response": {"status": "error", "message": "Invalid key"}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.search(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_url_yields_empty() {
        let client = NewsClient::new(NewsConfig::with_base_url("not a url ?")).unwrap();
        assert!(client.search(Some("android")).await.is_empty());

        let err = client.try_fetch_body("::::").await.unwrap_err();
        assert!(matches!(err, FetchError::UrlMalformed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = NewsConfig::with_base_url(format!("http://127.0.0.1:{port}/search?"));
        let client = NewsClient::new(config).unwrap();
        assert!(client.search(None).await.is_empty());
    }
}

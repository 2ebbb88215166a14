//! # Guardian News
//!
//! A small client for The Guardian's content search API. It turns a search
//! phrase into a request URL, fetches the response with bounded timeouts,
//! and decodes `response.results` into a list of [`ArticleRecord`]s,
//! tolerating missing fields and degrading to an empty list on any failure.
//!
//! ## Architecture
//!
//! 1. **Request building** ([`request`]): phrase → URL, default term when blank
//! 2. **Transport** ([`transport`]): GET with 15 s connect / 10 s read timeouts, 200 OK only
//! 3. **Decoding** ([`decode`]): defensive walk of the JSON body
//! 4. **Sessions** ([`session`]): one search in flight, newest result wins
//!
//! Hosts check connectivity first ([`connectivity`]) and present the outcome
//! as a [`state::ListState`].
//!
//! ## Usage
//!
//! ```ignore
//! use guardian_news::{NewsClient, NewsConfig};
//!
//! let client = NewsClient::new(NewsConfig::default())?;
//! let articles = client.search(Some("android game")).await;
//! ```

pub mod config;
pub mod connectivity;
pub mod decode;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod request;
pub mod session;
pub mod state;
pub mod transport;
pub mod utils;

pub use config::NewsConfig;
pub use error::FetchError;
pub use models::ArticleRecord;
pub use pipeline::NewsClient;
pub use request::build_request_url;
pub use session::{SearchSession, SearchUpdate};

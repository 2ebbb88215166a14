//! Data model for decoded search results.
//!
//! [`ArticleRecord`] is the only entity: one per element of the API's
//! `response.results` array. Field names on the wire are the Guardian's
//! camelCase keys, hence the serde renames.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// JSON key of the article title.
pub const KEY_TITLE: &str = "webTitle";
/// JSON key of the section name.
pub const KEY_SECTION: &str = "sectionName";
/// JSON key of the publication timestamp.
pub const KEY_DATE: &str = "webPublicationDate";
/// JSON key of the article URL.
pub const KEY_WEB_URL: &str = "webUrl";

/// A single search result.
///
/// Every attribute is optional: a key missing from the source object is
/// `None`, while a key present with an empty string is `Some("")`. Partial
/// records are valid and must be handled by whatever renders them.
///
/// # Fields
///
/// * `title` - Headline (`webTitle`)
/// * `section` - Section name such as "Technology" (`sectionName`)
/// * `published` - ISO-8601 publication timestamp, kept verbatim (`webPublicationDate`)
/// * `url` - Link to the article on the Guardian site (`webUrl`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "webTitle", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "sectionName", default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(
        rename = "webPublicationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<String>,
    #[serde(rename = "webUrl", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ArticleRecord {
    /// Build a record from its four attributes, in display order.
    pub fn new(
        title: Option<String>,
        section: Option<String>,
        published: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            title,
            section,
            published,
            url,
        }
    }

    /// Publication timestamp parsed as RFC 3339, if present and well-formed.
    ///
    /// The raw string in [`ArticleRecord::published`] is never modified.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.published
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

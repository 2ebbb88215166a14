//! JSON decoding of a search response body.
//!
//! The decoder walks `response.results` by hand over a [`serde_json::Value`]
//! rather than deserializing into a typed envelope, because a bad element
//! halfway through the array must not throw away the records decoded before
//! it.
//!
//! # Failure handling
//!
//! | Input | Result |
//! |-------|--------|
//! | blank body | empty, decoder not run |
//! | not JSON | empty, logged |
//! | no `response` object / no `results` array | empty, logged |
//! | element `n` is not an object | elements `0..n`, logged |
//! | a field is missing or `null` | that attribute is `None` |

use crate::error::{FetchError, Result};
use crate::models::{ArticleRecord, KEY_DATE, KEY_SECTION, KEY_TITLE, KEY_WEB_URL};
use crate::utils::{looks_truncated, truncate_for_log};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

const KEY_RESPONSE: &str = "response";
const KEY_RESULTS: &str = "results";

/// Longest body excerpt written to the log on a decode failure.
const BODY_PREVIEW_LEN: usize = 300;

/// Decode a response body into article records, in input order.
///
/// Never fails: errors are logged and whatever was decoded before the
/// error is returned.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn decode_articles(body: &str) -> Vec<ArticleRecord> {
    if body.trim().is_empty() {
        debug!("Blank response body; nothing to decode");
        return Vec::new();
    }

    let mut articles = Vec::new();
    if let Err(e) = collect_articles(body, &mut articles) {
        let truncated = matches!(&e, FetchError::JsonSyntax(inner) if looks_truncated(inner));
        error!(
            error = %e,
            decoded = articles.len(),
            truncated,
            body_preview = %truncate_for_log(body, BODY_PREVIEW_LEN),
            "Problem parsing the news JSON results"
        );
    }
    articles
}

/// Decode into `out`, stopping at the first structural problem.
///
/// Records pushed before the error stay in `out`.
pub fn collect_articles(body: &str, out: &mut Vec<ArticleRecord>) -> Result<()> {
    let root: Value = serde_json::from_str(body)?;

    let results = root
        .as_object()
        .ok_or_else(|| FetchError::JsonStructure("top level is not an object".to_string()))?
        .get(KEY_RESPONSE)
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::JsonStructure(format!("missing `{KEY_RESPONSE}` object")))?
        .get(KEY_RESULTS)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FetchError::JsonStructure(format!("missing `{KEY_RESPONSE}.{KEY_RESULTS}` array"))
        })?;

    for (index, element) in results.iter().enumerate() {
        let object = element.as_object().ok_or_else(|| {
            FetchError::JsonStructure(format!("`{KEY_RESULTS}[{index}]` is not an object"))
        })?;
        out.push(record_from_object(object));
    }

    debug!(count = out.len(), "Decoded news results");
    Ok(())
}

fn record_from_object(object: &Map<String, Value>) -> ArticleRecord {
    ArticleRecord {
        title: string_field(object, KEY_TITLE),
        section: string_field(object, KEY_SECTION),
        published: string_field(object, KEY_DATE),
        url: string_field(object, KEY_WEB_URL),
    }
}

/// Strings come back as-is, `null` and missing keys as `None`, anything
/// else as its JSON text.
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "response": {
            "status": "ok",
            "total": 3,
            "results": [
                {
                    "id": "technology/2024/oct/15/android-15",
                    "sectionName": "Technology",
                    "webPublicationDate": "2024-10-15T06:00:10Z",
                    "webTitle": "Android 15 review",
                    "webUrl": "https://www.theguardian.com/technology/2024/oct/15/android-15"
                },
                {
                    "sectionName": "Games",
                    "webPublicationDate": "2024-10-14T12:30:00Z",
                    "webTitle": "The best Android games",
                    "webUrl": "https://www.theguardian.com/games/2024/oct/14/best-android-games"
                },
                {
                    "webPublicationDate": "2024-10-13T09:00:00Z",
                    "webTitle": "Google antitrust ruling",
                    "webUrl": "https://www.theguardian.com/business/2024/oct/13/google-antitrust"
                }
            ]
        }
    }"#;

    #[test]
    fn test_fixture_with_partial_record() {
        let articles = decode_articles(FIXTURE);
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].title.as_deref(), Some("Android 15 review"));
        assert_eq!(articles[0].section.as_deref(), Some("Technology"));
        assert_eq!(articles[1].title.as_deref(), Some("The best Android games"));
        assert_eq!(articles[1].section.as_deref(), Some("Games"));

        for article in &articles[..2] {
            assert!(article.title.is_some());
            assert!(article.section.is_some());
            assert!(article.published.is_some());
            assert!(article.url.is_some());
        }

        let third = &articles[2];
        assert!(third.section.is_none());
        assert_eq!(third.title.as_deref(), Some("Google antitrust ruling"));
        assert_eq!(third.published.as_deref(), Some("2024-10-13T09:00:00Z"));
        assert!(third.url.is_some());
    }

    #[test]
    fn test_each_missing_field_is_independent() {
        let body = r#"{"response": {"results": [
            {"sectionName": "World", "webPublicationDate": "d", "webUrl": "u"},
            {"webTitle": "t", "webPublicationDate": "d", "webUrl": "u"},
            {"webTitle": "t", "sectionName": "World", "webUrl": "u"},
            {"webTitle": "t", "sectionName": "World", "webPublicationDate": "d"},
            {}
        ]}}"#;
        let articles = decode_articles(body);
        assert_eq!(articles.len(), 5);
        assert!(articles[0].title.is_none() && articles[0].section.is_some());
        assert!(articles[1].section.is_none() && articles[1].title.is_some());
        assert!(articles[2].published.is_none() && articles[2].url.is_some());
        assert!(articles[3].url.is_none() && articles[3].published.is_some());
        assert_eq!(articles[4], ArticleRecord::default());
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let body = r#"{"response": {"results": [{"webTitle": "", "sectionName": null}]}}"#;
        let articles = decode_articles(body);
        assert_eq!(articles[0].title.as_deref(), Some(""));
        assert!(articles[0].section.is_none());
    }

    #[test]
    fn test_non_string_values_are_coerced() {
        let body = r#"{"response": {"results": [{"webTitle": 42, "sectionName": true}]}}"#;
        let articles = decode_articles(body);
        assert_eq!(articles[0].title.as_deref(), Some("42"));
        assert_eq!(articles[0].section.as_deref(), Some("true"));
    }

    #[test]
    fn test_blank_body() {
        assert!(decode_articles("").is_empty());
        assert!(decode_articles("  \n\t ").is_empty());
    }

    #[test]
    fn test_not_json() {
        assert!(decode_articles("<html>Service Unavailable</html>").is_empty());

        let mut out = Vec::new();
        let err = collect_articles("{\"response\": ", &mut out).unwrap_err();
        assert!(matches!(err, FetchError::JsonSyntax(_)));
    }

    #[test]
    fn test_missing_or_wrong_results_path() {
        for body in [
            r#"[1, 2, 3]"#,
            r#"{"status": "ok"}"#,
            r#"{"response": "ok"}"#,
            r#"{"response": {"status": "ok"}}"#,
            r#"{"response": {"results": {"webTitle": "not an array"}}}"#,
        ] {
            assert!(decode_articles(body).is_empty(), "body: {body}");

            let mut out = Vec::new();
            let err = collect_articles(body, &mut out).unwrap_err();
            assert!(matches!(err, FetchError::JsonStructure(_)), "body: {body}");
        }
    }

    #[test]
    fn test_bad_element_keeps_earlier_records() {
        let body = r#"{"response": {"results": [
            {"webTitle": "first"},
            {"webTitle": "second"},
            "oops",
            {"webTitle": "never reached"}
        ]}}"#;
        let articles = decode_articles(body);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title.as_deref(), Some("second"));
    }

    #[test]
    fn test_multiline_body() {
        let body = "{\n  \"response\": {\n    \"results\": [\n      {\"webTitle\": \"a\"}\n    ]\n  }\n}\n";
        assert_eq!(decode_articles(body).len(), 1);
    }

    #[test]
    fn test_empty_results_array() {
        assert!(decode_articles(r#"{"response": {"results": []}}"#).is_empty());
    }
}

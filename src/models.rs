//! Data models for search requests, raw API articles and their normalized form.
//!
//! - [`SearchQuery`]: The per-run search request
//! - [`RawArticle`]: One entry of `response.results` as returned by the search API
//! - [`NormalizedArticle`]: The compact record published onto the stream
//! - [`PutRecordOutput`]: What the stream service reports for an accepted record
//!
//! Field names on the wire use camelCase to match the Guardian API, hence the
//! `#[serde(rename_all = "camelCase")]` attributes. `content_preview` is the one
//! snake_case field downstream consumers expect.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A search request for a single pipeline run.
///
/// # Fields
///
/// * `query` - Free-text search term sent as `q`
/// * `from_date` - Optional lower bound on publication date, sent as `from-date`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search term.
    pub query: String,
    /// Only return articles published on or after this date.
    pub from_date: Option<NaiveDate>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, from_date: Option<NaiveDate>) -> Self {
        Self {
            query: query.into(),
            from_date,
        }
    }

    /// The `from-date` parameter as the API expects it (`YYYY-MM-DD`).
    pub fn from_date_param(&self) -> Option<String> {
        self.from_date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// An article as returned by the search API.
///
/// Every field is optional; anything else the API sends (`id`, `sectionId`,
/// `apiUrl`, ...) is ignored. The three copied fields are kept as raw JSON so
/// an unusual type is passed through instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub web_publication_date: Option<Value>,
    pub web_title: Option<Value>,
    pub web_url: Option<Value>,
    pub fields: Option<RawFields>,
}

/// The nested `fields` object requested through `show-fields`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFields {
    pub body: Option<String>,
    /// Requested alongside `body` but not used for the preview, so any JSON
    /// type is accepted.
    pub trail_text: Option<Value>,
}

/// A normalized article ready for publishing.
///
/// Missing source fields stay `None` and serialize as `null` rather than being
/// dropped, so every record in a batch has the same four keys. Present fields
/// are copied verbatim, whatever their JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    #[serde(rename = "webPublicationDate")]
    pub web_publication_date: Option<Value>,
    #[serde(rename = "webTitle")]
    pub web_title: Option<Value>,
    #[serde(rename = "webUrl")]
    pub web_url: Option<Value>,
    /// At most [`crate::format::PREVIEW_CHARS`] characters of body or title.
    pub content_preview: String,
}

/// Result of a successful `PutRecord` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecordOutput {
    pub shard_id: String,
    pub sequence_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_date_param_formats_iso_date() {
        let q = SearchQuery::new("machine learning", NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(q.from_date_param(), Some("2023-01-01".to_string()));

        let q = SearchQuery::new("machine learning", None);
        assert_eq!(q.from_date_param(), None);
    }

    #[test]
    fn test_raw_article_ignores_unknown_fields() {
        let raw: RawArticle = serde_json::from_value(json!({
            "id": "info/2023/nov/21/who-said-what",
            "type": "article",
            "sectionId": "info",
            "webTitle": "Who said what",
            "fields": { "trailText": "Preview", "body": "<p>Body</p>" }
        }))
        .unwrap();

        assert_eq!(raw.web_title, Some(json!("Who said what")));
        assert!(raw.web_url.is_none());
        let fields = raw.fields.unwrap();
        assert_eq!(fields.body.as_deref(), Some("<p>Body</p>"));
        assert_eq!(fields.trail_text, Some(json!("Preview")));
    }

    #[test]
    fn test_normalized_article_serializes_absent_fields_as_null() {
        let article = NormalizedArticle {
            web_publication_date: None,
            web_title: Some(json!("Title")),
            web_url: None,
            content_preview: "Title".to_string(),
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(
            value,
            json!({
                "webPublicationDate": null,
                "webTitle": "Title",
                "webUrl": null,
                "content_preview": "Title"
            })
        );
    }

    #[test]
    fn test_raw_article_accepts_non_string_copied_fields() {
        let raw: RawArticle = serde_json::from_value(json!({
            "webPublicationDate": 1700565091,
            "webTitle": ["a", "b"],
            "webUrl": null
        }))
        .unwrap();

        assert_eq!(raw.web_publication_date, Some(json!(1700565091)));
        assert_eq!(raw.web_title, Some(json!(["a", "b"])));
        assert!(raw.web_url.is_none());
    }
}

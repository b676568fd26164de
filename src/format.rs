//! Normalization of raw search results into publishable records.

use crate::error::FormatError;
use crate::models::{NormalizedArticle, RawArticle};
use crate::utils::truncate_chars;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

/// Maximum length of `content_preview`, in characters.
pub const PREVIEW_CHARS: usize = 1000;

/// Format one search result into a [`NormalizedArticle`].
///
/// The preview is the first [`PREVIEW_CHARS`] characters of `fields.body` when it
/// is present and non-empty, otherwise of `webTitle` when it is a string,
/// otherwise empty. `fields.trailText` is not consulted. `webPublicationDate`,
/// `webTitle` and `webUrl` are copied unchanged, whatever their JSON type.
///
/// # Errors
///
/// * [`FormatError::TypeMismatch`] if `article` is not a JSON object
/// * [`FormatError::Unexpected`] if `fields` is not an object or `fields.body`
///   is not a string
pub fn format_article(article: &Value) -> Result<NormalizedArticle, FormatError> {
    if !article.is_object() {
        return Err(FormatError::TypeMismatch {
            found: json_kind(article),
        });
    }

    let raw = RawArticle::deserialize(article).map_err(|e| {
        error!(error = %e, "Unexpected error while formatting article");
        FormatError::Unexpected(e)
    })?;

    Ok(normalize(raw))
}

/// Build the normalized record from an already decoded article.
pub fn normalize(raw: RawArticle) -> NormalizedArticle {
    let body = raw
        .fields
        .and_then(|f| f.body)
        .filter(|b| !b.is_empty());

    let content_preview = match body {
        Some(body) => truncate_chars(&body, PREVIEW_CHARS),
        None => raw
            .web_title
            .as_ref()
            .and_then(Value::as_str)
            .map(|t| truncate_chars(t, PREVIEW_CHARS))
            .unwrap_or_default(),
    };

    NormalizedArticle {
        web_publication_date: raw.web_publication_date,
        web_title: raw.web_title,
        web_url: raw.web_url,
        content_preview,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Guardian content search API client.
//!
//! Issues a single `GET` against the search endpoint and hands back the parsed
//! JSON body untouched. There is no retry and no pagination: the first page is
//! all the pipeline ever sees.
//!
//! # Request
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `q` | the search term |
//! | `api-key` | from [`SearchConfig::api_key`] |
//! | `show-fields` | `trailText, body` |
//! | `from-date` | only when a date bound is given, `YYYY-MM-DD` |

use crate::error::FetchError;
use crate::models::SearchQuery;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{error, info, instrument};
use url::Url;

/// Default search endpoint.
pub const GUARDIAN_SEARCH_URL: &str = "https://content.guardianapis.com/search";

/// Fields requested for every result.
pub const SHOW_FIELDS: &str = "trailText, body";

const API_KEY_PARAM: &str = "api-key";

/// Connection settings for the search API.
///
/// Built by the caller (normally from CLI flags and environment) and passed in
/// explicitly; the client itself never reads the process environment.
#[derive(Clone)]
pub struct SearchConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
}

impl SearchConfig {
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self { endpoint, api_key }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Client for the content search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Search for articles matching `query`.
    ///
    /// # Returns
    ///
    /// The response body as parsed JSON, unmodified.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Configuration`] when no API key is configured; no request is sent
    /// * [`FetchError::Http`] on a non-success status
    /// * [`FetchError::Network`] on transport failures
    /// * [`FetchError::Unexpected`] for anything else, such as a non-JSON body
    #[instrument(level = "info", skip_all, fields(query = %query.query, from_date = ?query.from_date))]
    pub async fn fetch(&self, query: &SearchQuery) -> Result<Value, FetchError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                error!("Guardian API key is not configured");
                return Err(FetchError::Configuration);
            }
        };

        let mut params: Vec<(&str, String)> = vec![
            ("q", query.query.clone()),
            (API_KEY_PARAM, api_key.to_string()),
            ("show-fields", SHOW_FIELDS.to_string()),
        ];
        if let Some(from_date) = query.from_date_param() {
            params.push(("from-date", from_date));
        }

        let t0 = Instant::now();
        let response = self
            .http
            .get(self.config.endpoint.clone())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    error!(error = %e, "Unexpected error building search request");
                    FetchError::Unexpected(Box::new(e))
                } else {
                    error!(error = %e, "Error during search request");
                    FetchError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let url = redact_api_key(response.url());
            let body = response.text().await.unwrap_or_default();
            let body = truncate_for_log(&body, 300);
            error!(%status, %url, %body, "HTTP error from search API");
            return Err(FetchError::Http { status, url, body });
        }

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                error!(error = %e, "Search API returned a body that is not JSON");
                FetchError::Unexpected(Box::new(e))
            } else {
                error!(error = %e, "Error reading search response");
                FetchError::Network(e)
            }
        })?;

        info!(
            %status,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Search request succeeded"
        );
        Ok(body)
    }
}

/// Render `url` without its `api-key` query parameter.
fn redact_api_key(url: &Url) -> String {
    let mut clean = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != API_KEY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if pairs.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(pairs);
    }
    clean.to_string()
}

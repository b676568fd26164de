//! Fetch → format → publish orchestration.
//!
//! A run moves through three stages in order:
//!
//! 1. **Fetching**: one search request via [`SearchClient`]
//! 2. **Formatting**: the first [`MAX_ARTICLES`] results through [`format_article`]
//! 3. **Publishing**: the whole batch as one record via [`publish_articles`]
//!
//! Any failure ends the run and is returned unchanged inside [`PipelineError`].
//! Nothing is retried and nothing is published after a failure.

use crate::error::PipelineError;
use crate::fetch::SearchClient;
use crate::format::format_article;
use crate::models::{NormalizedArticle, PutRecordOutput, SearchQuery};
use crate::publish::{StreamClient, publish_articles};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Upper bound on articles per batch.
pub const MAX_ARTICLES: usize = 10;

/// Stage of a pipeline run, used for logging transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Formatting,
    Publishing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetching => f.write_str("fetching"),
            Stage::Formatting => f.write_str("formatting"),
            Stage::Publishing => f.write_str("publishing"),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of articles in the published batch.
    pub published: usize,
    /// Where the stream stored the record.
    pub record: Option<PutRecordOutput>,
}

/// The search client and stream client wired together.
#[derive(Debug)]
pub struct Pipeline<C> {
    search: SearchClient,
    stream: C,
}

impl<C: StreamClient> Pipeline<C> {
    pub fn new(search: SearchClient, stream: C) -> Self {
        Self { search, stream }
    }

    /// Run the pipeline once for `query`, publishing onto `stream_name`.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::Fetch`] if the search request fails
    /// * [`PipelineError::NoResults`] if `response.results` is missing or empty
    /// * [`PipelineError::Format`] if a result cannot be normalized
    /// * [`PipelineError::Publish`] if the batch cannot be published
    #[instrument(level = "info", skip_all, fields(query = %query.query, stream = %stream_name))]
    pub async fn run(
        &self,
        query: &SearchQuery,
        stream_name: &str,
    ) -> Result<RunSummary, PipelineError> {
        let outcome = self.run_stages(query, stream_name).await;
        match &outcome {
            Ok(summary) => info!(published = summary.published, "Articles sent to stream successfully"),
            Err(e) => debug!(kind = e.kind(), error = %e, "Pipeline run failed"),
        }
        outcome
    }

    async fn run_stages(
        &self,
        query: &SearchQuery,
        stream_name: &str,
    ) -> Result<RunSummary, PipelineError> {
        info!(stage = %Stage::Fetching, "Entering stage");
        let raw = self.search.fetch(query).await?;

        let results = extract_results(&raw).ok_or_else(|| {
            warn!("No articles found for the given query and date");
            PipelineError::NoResults {
                query: query.query.clone(),
            }
        })?;

        info!(stage = %Stage::Formatting, total = results.len(), "Entering stage");
        if results.len() > MAX_ARTICLES {
            info!(
                total = results.len(),
                kept = MAX_ARTICLES,
                "Truncating results to batch size"
            );
        }
        let batch = format_batch(results)?;

        info!(stage = %Stage::Publishing, count = batch.len(), "Entering stage");
        let record = publish_articles(&self.stream, &batch, stream_name).await?;

        Ok(RunSummary {
            published: batch.len(),
            record,
        })
    }
}

/// The non-empty `response.results` array, if there is one.
fn extract_results(raw: &Value) -> Option<&[Value]> {
    raw.pointer("/response/results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|results| !results.is_empty())
}

/// Format the first [`MAX_ARTICLES`] results, keeping their order.
fn format_batch(results: &[Value]) -> Result<Vec<NormalizedArticle>, PipelineError> {
    results
        .iter()
        .take(MAX_ARTICLES)
        .map(|article| format_article(article).map_err(PipelineError::from))
        .collect()
}

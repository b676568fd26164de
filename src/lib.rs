//! # Guardian Stream
//!
//! Fetches Guardian articles matching a search query, normalizes each into a
//! compact record and publishes the batch as a single message onto a Kinesis
//! stream.
//!
//! ## Architecture
//!
//! The pipeline is linear:
//! 1. **Fetching**: [`fetch::SearchClient`] runs one search request
//! 2. **Formatting**: [`format::format_article`] normalizes up to ten results
//! 3. **Publishing**: [`publish::publish_articles`] sends the batch as one record
//!
//! [`pipeline::Pipeline`] wires the three together. Logging goes through
//! `tracing`; installing a subscriber is left to the binary.

pub mod error;
pub mod fetch;
pub mod format;
pub mod kinesis;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{
    FailureOrigin, FetchError, FormatError, PipelineError, PublishError, StreamClientError,
};
pub use models::{NormalizedArticle, PutRecordOutput, RawArticle, SearchQuery};
pub use pipeline::{Pipeline, RunSummary};

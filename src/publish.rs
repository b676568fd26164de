//! Publishing a batch of normalized articles onto a message stream.
//!
//! The whole batch goes out as **one** record: the article list is serialized
//! to a single JSON array and handed to a [`StreamClient`] together with a
//! fixed partition key. There is no per-article record and no partial success.
//!
//! # Partitioning
//!
//! Every record uses [`PARTITION_KEY`], so all batches land on the same shard.
//! Ordering between runs is preserved; throughput is bounded by one shard.
//!
//! # Stream Clients
//!
//! | Client | Module | Notes |
//! |--------|--------|-------|
//! | [`KinesisClient`](crate::kinesis::KinesisClient) | [`kinesis`](crate::kinesis) | `PutRecord` through the AWS SDK |
//! | [`DryRunStream`] | here | Logs the payload, sends nothing |

use crate::error::{PublishError, StreamClientError};
use crate::models::{NormalizedArticle, PutRecordOutput};
use crate::utils::truncate_for_log;
use tracing::{error, info, instrument};

/// Routing key used for every record.
pub const PARTITION_KEY: &str = "guardian_content";

/// Trait for message-stream backends.
///
/// Implementors accept one record and report where the service stored it.
pub trait StreamClient {
    /// Put one record onto `stream_name`.
    ///
    /// # Arguments
    ///
    /// * `stream_name` - Stream name or ARN
    /// * `data` - The record payload
    /// * `partition_key` - Routing key for shard placement
    async fn put_record(
        &self,
        stream_name: &str,
        data: String,
        partition_key: &str,
    ) -> Result<PutRecordOutput, StreamClientError>;
}

/// Serialize `articles` into one payload and put it onto `stream_name`.
///
/// # Returns
///
/// * `Ok(None)` if `articles` is empty; the client is not called
/// * `Ok(Some(output))` once the stream accepted the record
///
/// # Errors
///
/// * [`PublishError::Serialization`] if the batch cannot be encoded
/// * [`PublishError::Stream`] if the client fails, tagged with the failure origin
#[instrument(level = "info", skip_all, fields(stream = %stream_name, count = articles.len()))]
pub async fn publish_articles<C: StreamClient>(
    client: &C,
    articles: &[NormalizedArticle],
    stream_name: &str,
) -> Result<Option<PutRecordOutput>, PublishError> {
    if articles.is_empty() {
        info!("No data to send to stream");
        return Ok(None);
    }

    let payload = serde_json::to_string(articles).map_err(|e| {
        error!(error = %e, "Error with JSON encoding");
        PublishError::Serialization(e)
    })?;

    match client.put_record(stream_name, payload, PARTITION_KEY).await {
        Ok(output) => {
            info!(
                shard_id = %output.shard_id,
                sequence_number = %output.sequence_number,
                "Data successfully sent to stream"
            );
            Ok(Some(output))
        }
        Err(e) => {
            let err = PublishError::from(e);
            error!(error = %err, "Error sending data to stream");
            Err(err)
        }
    }
}

/// A [`StreamClient`] that logs what it would send and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunStream;

impl StreamClient for DryRunStream {
    async fn put_record(
        &self,
        stream_name: &str,
        data: String,
        partition_key: &str,
    ) -> Result<PutRecordOutput, StreamClientError> {
        info!(
            stream = %stream_name,
            partition_key,
            bytes = data.len(),
            payload = %truncate_for_log(&data, 500),
            "Dry run: record not sent"
        );
        Ok(PutRecordOutput {
            shard_id: "dry-run".to_string(),
            sequence_number: "0".to_string(),
        })
    }
}

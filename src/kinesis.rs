//! Kinesis `PutRecord` through the AWS SDK.
//!
//! Credentials and region come from the standard AWS provider chain
//! (environment, profile, instance metadata). Requests are SigV4 signed by the
//! SDK. [`KinesisConfig::endpoint`] overrides the endpoint for a local emulator
//! such as LocalStack.
//!
//! SDK retries are disabled: one call, one attempt.

use crate::error::StreamClientError;
use crate::models::PutRecordOutput;
use crate::publish::StreamClient;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kinesis::Client;
use aws_sdk_kinesis::config::http::HttpResponse;
use aws_sdk_kinesis::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_kinesis::operation::put_record::PutRecordError;
use aws_sdk_kinesis::primitives::Blob;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// Where and how to reach Kinesis. Unset fields fall back to the AWS
/// provider chain.
#[derive(Debug, Clone, Default)]
pub struct KinesisConfig {
    pub endpoint: Option<Url>,
    pub region: Option<String>,
}

/// [`StreamClient`] backed by the Kinesis API.
#[derive(Debug, Clone)]
pub struct KinesisClient {
    client: Client,
}

impl KinesisClient {
    /// Resolve credentials and region from the environment, applying the
    /// overrides in `config`.
    pub async fn from_env(config: KinesisConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());
        if let Some(region) = config.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }
        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), endpoint = ?config.endpoint, "Loaded AWS configuration");
        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl StreamClient for KinesisClient {
    #[instrument(level = "info", skip(self, data), fields(bytes = data.len()))]
    async fn put_record(
        &self,
        stream_name: &str,
        data: String,
        partition_key: &str,
    ) -> Result<PutRecordOutput, StreamClientError> {
        let (name, arn) = if stream_name.starts_with("arn:") {
            (None, Some(stream_name.to_string()))
        } else {
            (Some(stream_name.to_string()), None)
        };

        let t0 = Instant::now();
        let output = self
            .client
            .put_record()
            .set_stream_name(name)
            .set_stream_arn(arn)
            .data(Blob::new(data.into_bytes()))
            .partition_key(partition_key)
            .send()
            .await
            .map_err(classify)?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "PutRecord answered");

        Ok(PutRecordOutput {
            shard_id: output.shard_id().to_string(),
            sequence_number: output.sequence_number().to_string(),
        })
    }
}

/// Split SDK failures into service rejections and everything on our side.
fn classify(err: SdkError<PutRecordError, HttpResponse>) -> StreamClientError {
    match err {
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().status().as_u16();
            let service_err = ctx.into_err();
            let code = service_err.code().unwrap_or("UnknownError").to_string();
            let message = service_err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| service_err.to_string());
            warn!(status, %code, %message, "PutRecord rejected");
            StreamClientError::Service {
                status,
                code,
                message,
            }
        }
        SdkError::ResponseError(_) => {
            warn!(error = %DisplayErrorContext(&err), "Unreadable PutRecord response");
            StreamClientError::Decode(Box::new(err))
        }
        other => {
            warn!(error = %DisplayErrorContext(&other), "PutRecord was not delivered");
            StreamClientError::Transport(Box::new(other))
        }
    }
}

//! Error types for each pipeline stage.
//!
//! Every component returns its own enum so callers can branch on the failure
//! kind. [`PipelineError`] wraps them without translation: a fetch failure
//! reaches the caller as [`PipelineError::Fetch`] carrying the original
//! [`FetchError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the search API call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured. Raised before any request is sent.
    #[error("API key is missing. Please set the \"Guardian_API_Key\" environment variable")]
    Configuration,

    /// The API answered with a non-success status.
    #[error("HTTP error {status} from {url}: {body}")]
    Http {
        status: StatusCode,
        /// Request URL with the API key stripped.
        url: String,
        /// Start of the response body, for context.
        body: String,
    },

    /// DNS, connection, timeout or other transport failure.
    #[error("network error during search request: {0}")]
    Network(#[source] reqwest::Error),

    /// Anything else, e.g. a success response whose body is not JSON.
    #[error("unexpected error during search request: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures of the article formatter.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input was not a JSON object.
    #[error("expected an object representing an article, found {found}")]
    TypeMismatch { found: &'static str },

    /// The input was an object but a known field had an unusable shape.
    #[error("unexpected error while formatting article: {0}")]
    Unexpected(#[source] serde_json::Error),
}

/// Which side of the stream call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// Credentials, connection or response decoding on our side.
    Client,
    /// The stream service rejected the request.
    Service,
}

impl std::fmt::Display for FailureOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureOrigin::Client => f.write_str("client"),
            FailureOrigin::Service => f.write_str("service"),
        }
    }
}

/// Boxed cause of a client-side stream failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures reported by a [`crate::publish::StreamClient`].
#[derive(Debug, Error)]
pub enum StreamClientError {
    /// The request never got a response: credentials, request construction,
    /// connection or timeout.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A response that could not be decoded.
    #[error("could not decode stream response: {0}")]
    Decode(#[source] BoxError),

    /// The service answered with an error.
    #[error("{code} ({status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },
}

impl StreamClientError {
    pub fn origin(&self) -> FailureOrigin {
        match self {
            StreamClientError::Transport(_) | StreamClientError::Decode(_) => FailureOrigin::Client,
            StreamClientError::Service { .. } => FailureOrigin::Service,
        }
    }
}

/// Failures of the publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The batch could not be encoded as JSON.
    #[error("error with JSON encoding: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The stream client failed; `origin` is kept for observability.
    #[error("error sending data to stream ({origin}-side): {source}")]
    Stream {
        origin: FailureOrigin,
        #[source]
        source: StreamClientError,
    },
}

impl From<StreamClientError> for PublishError {
    fn from(source: StreamClientError) -> Self {
        PublishError::Stream {
            origin: source.origin(),
            source,
        }
    }
}

/// Any failure of a full pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The search succeeded but `response.results` was missing or empty.
    #[error("no articles found for query {query:?}")]
    NoResults { query: String },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl PipelineError {
    /// Stable name of the failure kind, for logs and exit reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Fetch(FetchError::Configuration) => "configuration",
            PipelineError::Fetch(FetchError::Http { .. }) => "http",
            PipelineError::Fetch(FetchError::Network(_)) => "network",
            PipelineError::Fetch(FetchError::Unexpected(_)) => "unexpected",
            PipelineError::NoResults { .. } => "no_results",
            PipelineError::Format(FormatError::TypeMismatch { .. }) => "type_mismatch",
            PipelineError::Format(FormatError::Unexpected(_)) => "unexpected",
            PipelineError::Publish(PublishError::Serialization(_)) => "serialization",
            PipelineError::Publish(PublishError::Stream { .. }) => "publish",
        }
    }
}

//! Shared test doubles.

use crate::error::StreamClientError;
use crate::models::{NormalizedArticle, PutRecordOutput};
use crate::publish::StreamClient;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// One recorded `put_record` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCall {
    pub stream_name: String,
    pub data: String,
    pub partition_key: String,
}

type FailWith = Box<dyn Fn() -> StreamClientError + Send + Sync>;

/// In-memory [`StreamClient`] that records every call.
pub struct RecordingStream {
    calls: Mutex<Vec<PutCall>>,
    fail_with: Option<FailWith>,
}

impl RecordingStream {
    pub fn accepting() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(fail_with: impl Fn() -> StreamClientError + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(Box::new(fail_with)),
        }
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl StreamClient for RecordingStream {
    async fn put_record(
        &self,
        stream_name: &str,
        data: String,
        partition_key: &str,
    ) -> Result<PutRecordOutput, StreamClientError> {
        let seq = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(PutCall {
                stream_name: stream_name.to_string(),
                data,
                partition_key: partition_key.to_string(),
            });
            calls.len()
        };

        match &self.fail_with {
            Some(fail) => Err(fail()),
            None => Ok(PutRecordOutput {
                shard_id: "shardId-000000000000".to_string(),
                sequence_number: seq.to_string(),
            }),
        }
    }
}

/// `n` distinct normalized articles.
pub fn sample_articles(n: usize) -> Vec<NormalizedArticle> {
    (1..=n)
        .map(|i| NormalizedArticle {
            web_publication_date: Some(json!(format!("2023-11-{:02}T12:00:00Z", i % 28 + 1))),
            web_title: Some(json!(format!("Test Article {i}"))),
            web_url: Some(json!(format!("https://www.theguardian.com/article-{i}"))),
            content_preview: format!("<p>This is the full content of article {i}...</p>"),
        })
        .collect()
}

/// In-memory log sink for a `tracing_subscriber::fmt` subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// A plain-text subscriber writing every event at `DEBUG` and above here.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

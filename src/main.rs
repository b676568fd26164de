//! Command-line entry point: parse arguments, install logging, run the
//! pipeline once and turn the outcome into an exit status.

use clap::Parser;
use guardian_stream::fetch::{SearchClient, SearchConfig};
use guardian_stream::kinesis::{KinesisClient, KinesisConfig};
use guardian_stream::publish::{DryRunStream, StreamClient};
use guardian_stream::{Pipeline, PipelineError, RunSummary, SearchQuery};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.search_url, ?args.kinesis_endpoint, dry_run = args.dry_run, "Parsed CLI arguments");

    let search = SearchClient::new(SearchConfig::new(args.search_url.clone(), args.api_key.clone()));
    let query = SearchQuery::new(args.query.clone(), args.from_date);

    let outcome = if args.dry_run {
        run(Pipeline::new(search, DryRunStream), &query, &args.stream).await
    } else {
        let kinesis = KinesisClient::from_env(KinesisConfig {
            endpoint: args.kinesis_endpoint.clone(),
            region: args.region.clone(),
        })
        .await;
        run(Pipeline::new(search, kinesis), &query, &args.stream).await
    };

    let elapsed = start_time.elapsed();
    match outcome {
        Ok(summary) => {
            info!(
                ?elapsed,
                published = summary.published,
                sequence_number = summary.record.as_ref().map(|r| r.sequence_number.as_str()),
                "Execution complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(?elapsed, kind = e.kind(), error = %e, "Execution failed");
            ExitCode::FAILURE
        }
    }
}

async fn run<C: StreamClient>(
    pipeline: Pipeline<C>,
    query: &SearchQuery,
    stream: &str,
) -> Result<RunSummary, PipelineError> {
    pipeline.run(query, stream).await
}

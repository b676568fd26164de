//! Command-line interface definitions for Guardian Stream.
//!
//! All connection settings can be provided via flags or environment
//! variables; a `.env` file in the working directory is loaded first.

use chrono::NaiveDate;
use clap::Parser;
use guardian_stream::fetch::GUARDIAN_SEARCH_URL;
use url::Url;

/// Command-line arguments for Guardian Stream.
///
/// # Examples
///
/// ```sh
/// # Publish up to ten articles about machine learning
/// guardian_stream -q "machine learning" -s guardian-content
///
/// # Only articles published since the start of 2024, without sending
/// guardian_stream -q "machine learning" -s guardian-content -f 2024-01-01 --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search term
    #[arg(short, long)]
    pub query: String,

    /// Target stream name or ARN
    #[arg(short, long, env = "KINESIS_STREAM")]
    pub stream: String,

    /// Only include articles published on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub from_date: Option<NaiveDate>,

    /// Guardian content API key
    #[arg(long, env = "Guardian_API_Key", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search endpoint
    #[arg(long, env = "GUARDIAN_SEARCH_URL", default_value = GUARDIAN_SEARCH_URL)]
    pub search_url: Url,

    /// Kinesis endpoint override, e.g. LocalStack (default: regional AWS endpoint)
    #[arg(long, env = "KINESIS_ENDPOINT")]
    pub kinesis_endpoint: Option<Url>,

    /// AWS region (default: the AWS provider chain, e.g. AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Log the payload instead of publishing it
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

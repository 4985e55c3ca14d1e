//! CLI entry point for the LIS on-time dashboard pipeline.
//!
//! Provides subcommands for fetching daily flight data from AeroAPI, merging
//! the daily files, and computing the dashboard statistics report.

mod infra;
mod services;

use crate::infra::aeroapi::client::AeroApiClient;
use crate::services::flight_api::{DailyFlights, FlightApi};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lis_on_time::analyzers::analyzer::analyze;
use lis_on_time::config::{AeroApiConfig, DEFAULT_AEROAPI_BASE_URL, ReportMetadata};
use lis_on_time::merge::merge_all;
use lis_on_time::output::{
    cleanup_files, daily_file_name, merged_file_name, print_summary, write_raw, write_records,
};
use lis_on_time::record::{Direction, FlightRecord};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "lis_on_time")]
#[command(about = "Collects airport flight data and computes delay statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FetchArgs {
    /// First day to fetch (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// Last day to fetch, inclusive (YYYY-MM-DD); defaults to --date
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// ICAO code of the airport
    #[arg(long, default_value = "LPPT")]
    airport: String,

    /// Directory for the daily CSV files
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: PathBuf,

    /// Keep the raw API responses next to the CSV files
    #[arg(long, default_value_t = false)]
    keep_raw: bool,

    /// FlightAware AeroAPI key
    #[arg(long, env = "AEROAPI_KEY", hide_env_values = true)]
    api_key: String,

    /// AeroAPI endpoint
    #[arg(long, env = "AEROAPI_BASE_URL", default_value = DEFAULT_AEROAPI_BASE_URL)]
    base_url: String,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Merged arrivals CSV
    #[arg(long, default_value = "merged/merged_arrivals.csv")]
    arrivals: PathBuf,

    /// Merged departures CSV
    #[arg(long, default_value = "merged/merged_departures.csv")]
    departures: PathBuf,

    /// Where to write the report JSON
    #[arg(short, long, default_value = "flight-data.json")]
    output: PathBuf,

    /// Optional JSON file overriding the report metadata block
    #[arg(long)]
    metadata: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch arrivals and departures for one day or a range of days
    Fetch(FetchArgs),
    /// Merge all daily CSV files into one file per direction
    Merge {
        /// Directory containing the daily CSV files
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory for the merged CSV files
        #[arg(short, long, default_value = "merged")]
        output_dir: PathBuf,
    },
    /// Compute the dashboard report from merged CSV files
    Analyze(AnalyzeArgs),
    /// Fetch, merge and analyze in one go
    Run {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Directory for the merged CSV files
        #[arg(long, default_value = "merged")]
        merged_dir: PathBuf,

        /// Where to write the report JSON
        #[arg(short, long, default_value = "flight-data.json")]
        output: PathBuf,

        /// Optional JSON file overriding the report metadata block
        #[arg(long)]
        metadata: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/lis_on_time.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("lis_on_time.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => {
            fetch_range(&args).await?;
        }
        Commands::Merge {
            data_dir,
            output_dir,
        } => {
            merge_all(&data_dir, &output_dir)?;
        }
        Commands::Analyze(args) => {
            let metadata = load_metadata(args.metadata.as_deref())?;
            let report = analyze(&args.arrivals, &args.departures, &args.output, &metadata)?;
            print_summary(&report);
        }
        Commands::Run {
            fetch,
            merged_dir,
            output,
            metadata,
        } => {
            let metadata = load_metadata(metadata.as_deref())?;
            fetch_range(&fetch).await?;
            merge_all(&fetch.data_dir, &merged_dir)?;
            let report = analyze(
                &merged_dir.join(merged_file_name(Direction::Arrival)),
                &merged_dir.join(merged_file_name(Direction::Departure)),
                &output,
                &metadata,
            )?;
            print_summary(&report);
        }
    }

    Ok(())
}

/// Accepts only `YYYY-MM-DD`.
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}'. Please use YYYY-MM-DD format."))
}

fn load_metadata(path: Option<&str>) -> Result<ReportMetadata> {
    match path {
        Some(path) => ReportMetadata::load(path),
        None => Ok(ReportMetadata::default()),
    }
}

/// Every day from `from` to `to`, inclusive.
fn days_between(from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
    if to < from {
        bail!("--to ({to}) is before --date ({from})");
    }
    Ok(from.iter_days().take_while(|d| *d <= to).collect())
}

/// Fetches every requested day, one day at a time.
#[tracing::instrument(skip(args), fields(airport = %args.airport, from = %args.date))]
async fn fetch_range(args: &FetchArgs) -> Result<()> {
    let config = AeroApiConfig::new(&args.api_key, &args.base_url)?;
    let api = AeroApiClient::from_config(&config)?;

    let days = days_between(args.date, args.to.unwrap_or(args.date))?;
    info!(days = days.len(), data_dir = %args.data_dir.display(), "Fetching flight data");

    for date in days {
        fetch_day(&api, &args.airport, date, &args.data_dir, args.keep_raw).await?;
    }

    Ok(())
}

/// Fetches both directions for `date`, normalizes them and writes the daily
/// CSV files. Raw responses are written too and removed afterwards unless
/// `keep_raw` is set, whether or not the day succeeded.
#[tracing::instrument(skip(api, data_dir, date), fields(date = %date))]
async fn fetch_day<A: FlightApi>(
    api: &A,
    airport: &str,
    date: NaiveDate,
    data_dir: &Path,
    keep_raw: bool,
) -> Result<()> {
    let (arrivals, departures) = tokio::join!(
        api.daily_flights(airport, Direction::Arrival, date),
        api.daily_flights(airport, Direction::Departure, date),
    );

    let mut raw_files = Vec::new();
    let saved = save_day(
        date,
        data_dir,
        [
            (Direction::Arrival, arrivals),
            (Direction::Departure, departures),
        ],
        &mut raw_files,
    );

    if !keep_raw {
        cleanup_files(&raw_files);
    }

    saved
}

/// Writes the raw body and the daily CSV for each direction. A direction
/// with no flights leaves no CSV behind, not even one from an earlier run.
fn save_day(
    date: NaiveDate,
    data_dir: &Path,
    results: [(Direction, Result<DailyFlights>); 2],
    raw_files: &mut Vec<PathBuf>,
) -> Result<()> {
    for (direction, result) in results {
        let daily = result?;

        let raw_path = data_dir.join(daily_file_name(date, direction, "json"));
        write_raw(&raw_path, &daily.raw_body)?;
        raw_files.push(raw_path);

        let records: Vec<FlightRecord> = daily
            .flights
            .iter()
            .map(|flight| FlightRecord::from_raw(flight, direction))
            .collect();

        let csv_path = data_dir.join(daily_file_name(date, direction, "csv"));

        if records.is_empty() {
            warn!(%direction, "No flights returned, skipping CSV");
            match std::fs::remove_file(&csv_path) {
                Ok(()) => info!(path = %csv_path.display(), "Removed stale daily CSV"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("removing stale {}", csv_path.display()));
                }
            }
            continue;
        }

        write_records(&csv_path, &records)
            .with_context(|| format!("saving {direction} for {date}"))?;
        info!(%direction, flights = records.len(), path = %csv_path.display(), "Saved daily CSV");
    }

    Ok(())
}

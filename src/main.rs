mod config;
mod engine;
mod models;
mod report;
mod scoring;
mod storage;
mod types;

use std::io::stderr;
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{partitions_from_env, ScoringConfig};
use crate::engine::{load_transactions, FeatureEngineer};
use crate::report::write_scores_to_path;
use crate::scoring::ClusterScorer;

const LOG_LEVEL_ENV: &str = "CREDIT_SCORE_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: wallet-credit-score [input].json [output].csv");
        eprintln!("Log level is read from {LOG_LEVEL_ENV}: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let log_level = std::env::var(LOG_LEVEL_ENV)
        .map(|level| parse_log_level(&level)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let config = ScoringConfig::from_env()?;
    let engineer = FeatureEngineer::new().with_partitions(partitions_from_env()?)?;
    let timer = Instant::now();

    let records = load_transactions(input).await?;
    let report = engineer.engineer(records).await?;

    info!(
        "Accepted {} of {} records, dropped {}",
        report.records_accepted, report.records_seen, report.records_dropped
    );

    if report.features.is_empty() {
        warn!("No wallet had a valid transaction, no scores written");
        return Ok(());
    }

    let scores = ClusterScorer::new(config).score(report.features)?;
    let rows = write_scores_to_path(output, &scores)?;

    let duration = timer.elapsed();

    info!("Saved {rows} wallet scores to {} in {duration:?}", output.display());

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

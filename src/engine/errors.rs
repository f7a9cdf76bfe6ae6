use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

/// Conditions that stop a run before any output is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not open input file [{}]: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: io::Error
    },
    #[error("Could not parse input file [{}] as a JSON array of records: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error
    },
    #[error("Input file [{}] contains no records", .path.display())]
    EmptyInput {
        path: PathBuf
    },
    #[error("A feature engineering worker failed: {0}")]
    Worker(#[from] JoinError)
}

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::task::spawn_blocking;
use tracing::info;

use crate::engine::PipelineError;

/// Reads the input file as a JSON array of transaction records.
///
/// Elements are returned unvalidated; each one is checked individually during
/// feature engineering.
///
/// # Errors
/// Fails if the file cannot be opened, is not a JSON array, or is empty.
pub async fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Value>, PipelineError> {
    let path = path.as_ref().to_path_buf();

    info!("Loading raw transaction data from: {}", path.display());

    let records = spawn_blocking(move || read_records(path)).await??;

    info!("Loaded {} records", records.len());

    Ok(records)
}

fn read_records(path: PathBuf) -> Result<Vec<Value>, PipelineError> {
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(PipelineError::Open { path, source })
    };

    let records: Vec<Value> = match serde_json::from_reader(BufReader::new(file)) {
        Ok(records) => records,
        Err(source) => return Err(PipelineError::Parse { path, source })
    };

    if records.is_empty() {
        return Err(PipelineError::EmptyInput { path });
    }

    Ok(records)
}

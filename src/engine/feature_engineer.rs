use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use crate::config::{ConfigError, DEFAULT_PARTITIONS};
use crate::engine::PipelineError;
use crate::models::{FeatureTable, Transaction, WalletActivity};
use crate::storage::{ActivityStorage, Storage};
use crate::types::WalletId;

/// Feature table produced by one run, with record accounting.
#[derive(Debug, Clone, Default)]
pub struct EngineeringReport {
    pub features: FeatureTable,
    pub records_seen: usize,
    pub records_accepted: usize,
    pub records_dropped: usize
}

/// Reduces raw transaction records to one feature vector per wallet.
pub struct FeatureEngineer {
    partitions: usize
}

impl FeatureEngineer {
    pub fn new() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS
        }
    }

    /// Sets how many blocking workers share the accumulation work.
    pub fn with_partitions(mut self, partitions: usize) -> Result<Self, ConfigError> {
        if partitions == 0 {
            return Err(ConfigError::ZeroPartitions)
        }

        self.partitions = partitions;
        Ok(self)
    }

    /// Validates and accumulates every record, then derives wallet features.
    ///
    /// The records are split into contiguous partitions accumulated on
    /// blocking workers. Partials are merged per wallet, which is safe because
    /// accumulation is order-independent. Invalid records are dropped.
    pub async fn engineer(&self, records: Vec<Value>) -> Result<EngineeringReport, PipelineError> {
        let records_seen = records.len();
        let storage = Arc::new(ActivityStorage::new());

        info!("Starting feature engineering for {records_seen} records across {} partitions", self.partitions);

        let workers = partition(records, self.partitions).into_iter().map(|chunk| {
            let storage = storage.clone();
            spawn_blocking(move || accumulate_partition(chunk, storage.as_ref()))
        });

        let mut records_accepted = 0;

        for result in join_all(workers).await {
            records_accepted += result?;
        }

        info!("Feature engineering complete: {} wallets", storage.wallet_count());

        let features = storage.features();
        let records_dropped = records_seen - records_accepted;

        Ok(EngineeringReport {
            features,
            records_seen,
            records_accepted,
            records_dropped
        })
    }
}

fn partition(records: Vec<Value>, partitions: usize) -> Vec<Vec<Value>> {
    let chunk_size = records.len().div_ceil(partitions).max(1);
    let mut records = records.into_iter();
    let mut chunks = Vec::with_capacity(partitions);

    loop {
        let chunk: Vec<Value> = records.by_ref().take(chunk_size).collect();

        if chunk.is_empty() {
            break;
        }

        chunks.push(chunk);
    }

    chunks
}

/// Accumulates one partition locally and merges the partials into storage.
/// Returns the number of accepted records.
fn accumulate_partition<S: Storage>(records: Vec<Value>, storage: &S) -> usize {
    let mut partials = HashMap::<WalletId, WalletActivity>::new();
    let mut accepted = 0;

    for value in records {
        let transaction = match Transaction::from_value(value) {
            Ok(transaction) => transaction,
            Err(error) => {
                debug!("Dropping record: {error}");
                continue;
            }
        };

        partials.entry(transaction.wallet.clone()).or_default().record(&transaction);
        accepted += 1;
    }

    for (wallet_id, activity) in partials {
        storage.merge(wallet_id, activity);
    }

    accepted
}

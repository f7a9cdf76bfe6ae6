use crate::models::{FeatureTable, WalletActivity};
use crate::storage::Storage;
use crate::types::WalletId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Wallet accumulators shared by the partition workers of a single run.
pub struct ActivityStorage {
    cache: DashMap<WalletId, WalletActivity>
}

impl ActivityStorage {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new()
        }
    }

    pub fn wallet_count(&self) -> usize {
        self.cache.len()
    }

    /// Derives the feature vector of every stored wallet.
    pub fn features(&self) -> FeatureTable {
        self.cache.iter()
            .map(|entry| (entry.key().clone(), entry.value().features()))
            .collect()
    }
}

impl Storage for ActivityStorage {
    fn merge(&self, wallet_id: WalletId, activity: WalletActivity) {
        match self.cache.entry(wallet_id) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(activity),
            Entry::Vacant(entry) => {
                entry.insert(activity);
            }
        }
    }
}

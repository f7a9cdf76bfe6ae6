use std::collections::BTreeMap;

use crate::types::WalletId;

/// Names of the columns fed to the clustering model, in input order.
pub const MODEL_FEATURE_COLUMNS: [&str; 5] = [
    "repay_borrow_ratio_count",
    "liquidation_ratio",
    "active_days",
    "total_usd_all_actions",
    "avg_time_between_tx_days"
];

/// Behavioral summary of one wallet.
///
/// All floating point fields are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub total_tx: u64,
    pub total_usd_all_actions: f64,
    pub repay_borrow_ratio_count: f64,
    pub num_liquidations: u64,
    pub liquidation_ratio: f64,
    pub active_days: f64,
    pub avg_time_between_tx_days: f64
}

impl FeatureVector {
    /// The model input row, ordered as `MODEL_FEATURE_COLUMNS`.
    pub fn model_input(&self) -> Vec<f64> {
        [
            self.repay_borrow_ratio_count,
            self.liquidation_ratio,
            self.active_days,
            self.total_usd_all_actions,
            self.avg_time_between_tx_days
        ]
        .into_iter()
        .map(finite_or_zero)
        .collect()
    }
}

/// Replaces infinities and NaN with 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// A feature vector with its cluster assignment and score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWallet {
    pub features: FeatureVector,
    pub cluster: usize,
    pub credit_score: u32
}

pub type FeatureTable = BTreeMap<WalletId, FeatureVector>;
pub type ScoredTable = BTreeMap<WalletId, ScoredWallet>;

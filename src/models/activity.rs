use crate::config::{NO_BORROW_REPAY_RATIO, SECONDS_PER_DAY};
use crate::models::{finite_or_zero, ActionType, FeatureVector, Transaction};
use crate::types::Timestamp;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Running statistics for a single wallet.
///
/// Sums are saturating decimals and timestamps are kept unsorted, so the derived
/// features do not depend on the order records were recorded or merged in.
#[derive(Debug, Clone, Default)]
pub struct WalletActivity {
    /// Number of valid transactions recorded.
    pub total_tx: u64,
    /// USD value across every action.
    pub total_usd: Decimal,
    pub action_counts: BTreeMap<ActionType, u64>,
    pub action_usd: BTreeMap<ActionType, Decimal>,
    /// Distinct actions observed.
    pub actions_seen: BTreeSet<ActionType>,
    timestamps: Vec<Timestamp>
}

impl WalletActivity {
    /// Adds a single validated transaction.
    ///
    /// USD sums saturate at `Decimal::MAX`, the same as in `merge`, so a
    /// wallet's totals do not depend on how its records were partitioned.
    pub fn record(&mut self, transaction: &Transaction) {
        let action = &transaction.action;

        self.total_tx += 1;
        self.total_usd = self.total_usd.saturating_add(transaction.usd_value);
        *self.action_counts.entry(action.clone()).or_default() += 1;

        let action_usd = self.action_usd.entry(action.clone()).or_default();
        *action_usd = action_usd.saturating_add(transaction.usd_value);

        self.actions_seen.insert(action.clone());
        self.timestamps.push(transaction.timestamp);
    }

    /// Folds another partial accumulator for the same wallet into this one.
    pub fn merge(&mut self, other: WalletActivity) {
        self.total_tx += other.total_tx;
        self.total_usd = self.total_usd.saturating_add(other.total_usd);

        for (action, count) in other.action_counts {
            *self.action_counts.entry(action).or_default() += count;
        }

        for (action, usd) in other.action_usd {
            let total = self.action_usd.entry(action).or_default();
            *total = total.saturating_add(usd);
        }

        self.actions_seen.extend(other.actions_seen);
        self.timestamps.extend(other.timestamps);
    }

    pub fn count(&self, action: &ActionType) -> u64 {
        self.action_counts.get(action).copied().unwrap_or(0)
    }

    /// Derives the wallet's feature vector.
    pub fn features(&self) -> FeatureVector {
        let total_tx = self.total_tx;
        let borrows = self.count(&ActionType::Borrow);
        let repays = self.count(&ActionType::Repay);
        let liquidations = self.count(&ActionType::LiquidationCall);

        let repay_borrow_ratio_count = if borrows > 0 {
            repays as f64 / borrows as f64
        } else {
            NO_BORROW_REPAY_RATIO
        };

        let liquidation_ratio = if total_tx > 0 {
            liquidations as f64 / total_tx as f64
        } else {
            0.0
        };

        let mut timestamps = self.timestamps.clone();
        timestamps.sort_unstable();

        let first_timestamp = timestamps.first().copied().unwrap_or_default();
        let last_timestamp = timestamps.last().copied().unwrap_or_default();

        let active_days = if timestamps.len() > 1 {
            last_timestamp.abs_diff(first_timestamp) as f64 / SECONDS_PER_DAY as f64
        } else {
            0.0
        };

        let avg_time_between_tx_days = if total_tx > 1 {
            active_days / total_tx as f64
        } else {
            0.0
        };

        FeatureVector {
            total_tx,
            total_usd_all_actions: to_usd(self.total_usd),
            repay_borrow_ratio_count: finite_or_zero(repay_borrow_ratio_count),
            num_liquidations: liquidations,
            liquidation_ratio: finite_or_zero(liquidation_ratio),
            active_days: finite_or_zero(active_days),
            avg_time_between_tx_days: finite_or_zero(avg_time_between_tx_days)
        }
    }
}

fn to_usd(value: Decimal) -> f64 {
    finite_or_zero(value.to_f64().unwrap_or(0.0)).max(0.0)
}

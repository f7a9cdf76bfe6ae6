use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::{ScoringConfig, LIQUIDATION_PENALTY, MAX_CREDIT_SCORE};
use crate::models::{FeatureTable, FeatureVector, ScoredTable, ScoredWallet, MODEL_FEATURE_COLUMNS};
use crate::scoring::{ClusteringError, KMeans, MinMaxScaler};
use crate::types::WalletId;

/// Groups wallets into behavioral archetypes and scores each archetype.
pub struct ClusterScorer {
    config: ScoringConfig
}

impl ClusterScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Assigns every wallet a cluster and a credit score in `[0, 1000]`.
    ///
    /// Clusters are ordered by their health metric and the dense rank is
    /// spread evenly over the score range, so wallets sharing a cluster share
    /// a score. An empty table is returned unchanged.
    ///
    /// When the batch has fewer distinct feature rows than configured
    /// clusters, the cluster count is reduced to that number while scores keep
    /// the configured spacing.
    pub fn score(&self, features: FeatureTable) -> Result<ScoredTable, ClusteringError> {
        if features.is_empty() {
            warn!("Feature table is empty, skipping score generation");
            return Ok(ScoredTable::new());
        }

        let (wallets, vectors): (Vec<WalletId>, Vec<FeatureVector>) = features.into_iter().unzip();

        let inputs: Vec<Vec<f64>> = vectors.iter().map(FeatureVector::model_input).collect();
        let scaled = MinMaxScaler::fit_transform(&inputs);
        let clusters = distinct_rows(&scaled).min(self.config.n_clusters());

        info!("Clustering {} wallets into {clusters} clusters", wallets.len());
        debug!("Model input columns: {}", MODEL_FEATURE_COLUMNS.join(", "));

        let clustering = KMeans::new(clusters)
            .with_n_init(self.config.n_init())
            .with_max_iterations(self.config.max_iterations())
            .with_tolerance(self.config.tolerance())
            .with_seed(self.config.seed())
            .fit(&scaled)?;

        debug!(
            "Fitted {} centroids with inertia [{}] after [{}] iterations",
            clustering.centroids.len(), clustering.inertia, clustering.iterations
        );

        let ranks = dense_rank(&cluster_health(&vectors, &clustering.labels));

        let scored: ScoredTable = wallets.into_iter()
            .zip(vectors)
            .zip(clustering.labels)
            .map(|((wallet, features), cluster)| {
                let rank = ranks.get(&cluster).copied().unwrap_or_default();
                let credit_score = scale_rank(rank, &self.config);

                (wallet, ScoredWallet { features, cluster, credit_score })
            })
            .collect();

        let mut members = BTreeMap::<usize, (u32, usize)>::new();

        for scored_wallet in scored.values() {
            members.entry(scored_wallet.cluster).or_insert((scored_wallet.credit_score, 0)).1 += 1;
        }

        for (cluster, (credit_score, count)) in members {
            info!("Cluster [{cluster}]: {count} wallets scored {credit_score}");
        }

        info!("Credit scores generated for {} wallets", scored.len());

        Ok(scored)
    }
}

/// Mean repay/borrow ratio minus the penalized mean liquidation ratio of each
/// cluster that has members.
pub fn cluster_health(vectors: &[FeatureVector], labels: &[usize]) -> BTreeMap<usize, f64> {
    let mut totals = BTreeMap::<usize, (f64, f64, usize)>::new();

    for (vector, label) in vectors.iter().zip(labels) {
        let entry = totals.entry(*label).or_insert((0.0, 0.0, 0));
        entry.0 += vector.repay_borrow_ratio_count;
        entry.1 += vector.liquidation_ratio;
        entry.2 += 1;
    }

    totals.into_iter()
        .map(|(cluster, (repay, liquidation, members))| {
            let members = members as f64;
            (cluster, repay / members - LIQUIDATION_PENALTY * liquidation / members)
        })
        .collect()
}

/// Ascending dense rank: equal values share a rank and ranks have no gaps.
pub fn dense_rank(values: &BTreeMap<usize, f64>) -> BTreeMap<usize, usize> {
    let mut distinct: Vec<f64> = values.values().copied().collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    values.iter()
        .map(|(cluster, value)| (*cluster, distinct.partition_point(|other| other < value)))
        .collect()
}

/// Spreads a rank over `[0, 1000]` in `n_clusters - 1` equal steps,
/// truncating toward zero.
pub fn scale_rank(rank: usize, config: &ScoringConfig) -> u32 {
    let steps = (config.n_clusters() - 1) as u64;
    let score = rank as u64 * u64::from(MAX_CREDIT_SCORE) / steps;

    score.min(u64::from(MAX_CREDIT_SCORE)) as u32
}

fn distinct_rows(rows: &[Vec<f64>]) -> usize {
    let mut sorted: Vec<&Vec<f64>> = rows.iter().collect();

    sorted.sort_by(|a, b| {
        a.iter().zip(b.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    });
    sorted.dedup();

    sorted.len()
}

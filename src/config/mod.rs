mod errors;
#[cfg(test)]
mod tests;

use rust_decimal::Decimal;

pub use errors::ConfigError;

/// Raw `amount` values carry six implied decimal places.
pub const AMOUNT_DECIMALS: u32 = 6;
/// Price applied when a record has no `assetPriceUSD`.
pub const DEFAULT_ASSET_PRICE_USD: Decimal = Decimal::ONE;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Repay/borrow ratio given to wallets that never borrowed.
pub const NO_BORROW_REPAY_RATIO: f64 = 1.0;
/// Weight of the mean liquidation ratio in the cluster health metric.
pub const LIQUIDATION_PENALTY: f64 = 2.0;

pub const N_CLUSTERS: usize = 5;
pub const RANDOM_SEED: u64 = 42;
pub const N_INIT: usize = 10;
pub const MAX_ITERATIONS: usize = 300;
pub const TOLERANCE: f64 = 1e-4;
pub const MAX_CREDIT_SCORE: u32 = 1000;

pub const DEFAULT_PARTITIONS: usize = 4;

pub const CLUSTERS_ENV: &str = "CREDIT_SCORE_CLUSTERS";
pub const SEED_ENV: &str = "CREDIT_SCORE_SEED";
pub const PARTITIONS_ENV: &str = "CREDIT_SCORE_PARTITIONS";

/// Parameters of the clustering stage.
///
/// Only constructible through validating paths, so a scorer never sees a
/// cluster count that cannot be spread over the score range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    n_clusters: usize,
    seed: u64,
    n_init: usize,
    max_iterations: usize,
    tolerance: f64
}

impl ScoringConfig {
    /// Creates a configuration with the given cluster count and default
    /// k-means parameters.
    ///
    /// # Errors
    /// Returns `ConfigError::TooFewClusters` when `n_clusters < 2`.
    pub fn new(n_clusters: usize) -> Result<Self, ConfigError> {
        if n_clusters < 2 {
            return Err(ConfigError::TooFewClusters { clusters: n_clusters })
        }

        Ok(Self {
            n_clusters,
            seed: RANDOM_SEED,
            n_init: N_INIT,
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a key lookup, applying the
    /// `CREDIT_SCORE_CLUSTERS` and `CREDIT_SCORE_SEED` overrides when present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let n_clusters = match lookup(CLUSTERS_ENV) {
            Some(value) => parse_override(CLUSTERS_ENV, &value)?,
            None => N_CLUSTERS
        };

        let mut config = Self::new(n_clusters)?;

        if let Some(value) = lookup(SEED_ENV) {
            config = config.with_seed(parse_override(SEED_ENV, &value)?);
        }

        Ok(config)
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn n_init(&self) -> usize {
        self.n_init
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            n_clusters: N_CLUSTERS,
            seed: RANDOM_SEED,
            n_init: N_INIT,
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE
        }
    }
}

/// Number of feature engineering partitions from the process environment.
pub fn partitions_from_env() -> Result<usize, ConfigError> {
    partitions_from_lookup(|key| std::env::var(key).ok())
}

/// Reads the `CREDIT_SCORE_PARTITIONS` override, defaulting to
/// `DEFAULT_PARTITIONS`.
///
/// # Errors
/// Returns `ConfigError::InvalidOverride` for a non-numeric value and
/// `ConfigError::ZeroPartitions` for zero.
pub fn partitions_from_lookup<F>(lookup: F) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>
{
    let partitions = match lookup(PARTITIONS_ENV) {
        Some(value) => parse_override(PARTITIONS_ENV, &value)?,
        None => DEFAULT_PARTITIONS
    };

    if partitions == 0 {
        return Err(ConfigError::ZeroPartitions)
    }

    Ok(partitions)
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string()
    })
}

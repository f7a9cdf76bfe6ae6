use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: at least 2 clusters are required to spread scores, got [{clusters}]")]
    TooFewClusters {
        clusters: usize
    },
    #[error("Configuration error: feature engineering needs at least one partition")]
    ZeroPartitions,
    #[error("Configuration error: invalid value [{value}] for [{key}]")]
    InvalidOverride {
        key: String,
        value: String
    }
}

use super::{
    partitions_from_lookup, ConfigError, ScoringConfig, CLUSTERS_ENV, DEFAULT_PARTITIONS, MAX_ITERATIONS, N_CLUSTERS, N_INIT,
    PARTITIONS_ENV, RANDOM_SEED, SEED_ENV, TOLERANCE
};

use std::collections::HashMap;

use anyhow::Result;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    move |key: &str| values.get(key).cloned()
}

#[test]
fn test_default_config_uses_policy_constants() -> Result<()> {
    let config = ScoringConfig::default();

    assert_eq!(config.n_clusters(), N_CLUSTERS);
    assert_eq!(config.seed(), RANDOM_SEED);
    assert_eq!(config, ScoringConfig::new(N_CLUSTERS)?);

    Ok(())
}

#[test]
fn test_single_cluster_is_rejected_at_configuration_time() {
    assert!(matches!(ScoringConfig::new(1), Err(ConfigError::TooFewClusters { clusters: 1 })));
    assert!(matches!(ScoringConfig::new(0), Err(ConfigError::TooFewClusters { clusters: 0 })));
}

#[test]
fn test_new_config_uses_default_kmeans_parameters() -> Result<()> {
    let config = ScoringConfig::new(3)?;

    assert_eq!(config.n_init(), N_INIT);
    assert_eq!(config.max_iterations(), MAX_ITERATIONS);
    assert_eq!(config.tolerance(), TOLERANCE);

    Ok(())
}

#[test]
fn test_lookup_without_overrides_matches_default() -> Result<()> {
    let config = ScoringConfig::from_lookup(lookup_from(&[]))?;

    assert_eq!(config, ScoringConfig::default());

    Ok(())
}

#[test]
fn test_lookup_applies_cluster_and_seed_overrides() -> Result<()> {
    let config = ScoringConfig::from_lookup(lookup_from(&[(CLUSTERS_ENV, " 3 "), (SEED_ENV, "7")]))?;

    assert_eq!(config.n_clusters(), 3);
    assert_eq!(config.seed(), 7);

    Ok(())
}

#[test]
fn test_lookup_rejects_invalid_overrides() {
    let single = ScoringConfig::from_lookup(lookup_from(&[(CLUSTERS_ENV, "1")]));
    let garbage = ScoringConfig::from_lookup(lookup_from(&[(SEED_ENV, "forty-two")]));

    assert!(matches!(single, Err(ConfigError::TooFewClusters { clusters: 1 })));
    assert!(matches!(garbage, Err(ConfigError::InvalidOverride { .. })));
}

#[test]
fn test_partitions_lookup_defaults_and_overrides() -> Result<()> {
    assert_eq!(partitions_from_lookup(lookup_from(&[]))?, DEFAULT_PARTITIONS);
    assert_eq!(partitions_from_lookup(lookup_from(&[(PARTITIONS_ENV, " 16 ")]))?, 16);

    Ok(())
}

#[test]
fn test_partitions_lookup_rejects_zero_and_garbage() {
    let zero = partitions_from_lookup(lookup_from(&[(PARTITIONS_ENV, "0")]));
    let garbage = partitions_from_lookup(lookup_from(&[(PARTITIONS_ENV, "many")]));

    assert!(matches!(zero, Err(ConfigError::ZeroPartitions)));
    assert!(matches!(garbage, Err(ConfigError::InvalidOverride { .. })));
}

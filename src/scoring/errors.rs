use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusteringError {
    #[error("Clustering error: no samples to cluster")]
    NoSamples,
    #[error("Clustering error: at least one cluster is required")]
    NoClusters,
    #[error("Clustering error: [{clusters}] clusters requested for [{samples}] samples")]
    TooManyClusters {
        clusters: usize,
        samples: usize
    },
    #[error("Clustering error: sample [{index}] has [{found}] features, expected [{expected}]")]
    RaggedRows {
        index: usize,
        expected: usize,
        found: usize
    }
}

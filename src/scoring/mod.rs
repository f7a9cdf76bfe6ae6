mod cluster_scorer;
mod errors;
mod kmeans;
mod scaler;

pub use cluster_scorer::ClusterScorer;
pub use errors::ClusteringError;
pub use kmeans::KMeans;
pub use scaler::MinMaxScaler;

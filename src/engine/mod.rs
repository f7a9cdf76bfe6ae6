mod errors;
mod feature_engineer;
mod loader;

pub use errors::PipelineError;
pub use feature_engineer::FeatureEngineer;
pub use loader::load_transactions;

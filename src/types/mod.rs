mod errors;
mod numeric;
#[cfg(test)]
mod tests;

pub use errors::NumericError;
pub use numeric::NumericField;

pub type WalletId = String;
/// Seconds since the Unix epoch.
pub type Timestamp = i64;

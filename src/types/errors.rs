use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumericError {
    #[error("Numeric error: {0}")]
    InvalidFormat(String),
    #[error("Numeric error: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("Numeric error: Value is not finite")]
    NonFinite,
    #[error("Numeric error: Value is not a whole number")]
    NotInteger,
    #[error("Numeric error: Overflow")]
    Overflow
}

use crate::types::NumericError;
use thiserror::Error;

/// Reasons a single input record is dropped before accumulation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Record is missing a wallet")]
    MissingWallet,
    #[error("Record for wallet [{wallet}] is missing an action")]
    MissingAction {
        wallet: String
    },
    #[error("Record [{action}] for wallet [{wallet}] is missing a timestamp")]
    MissingTimestamp {
        wallet: String,
        action: String
    },
    #[error("Record [{action}] for wallet [{wallet}] has an invalid timestamp: {source}")]
    InvalidTimestamp {
        wallet: String,
        action: String,
        source: NumericError
    },
    #[error("Record [{action}] for wallet [{wallet}] is missing action data")]
    MissingActionData {
        wallet: String,
        action: String
    },
    #[error("Record [{action}] for wallet [{wallet}] is missing an amount")]
    MissingAmount {
        wallet: String,
        action: String
    },
    #[error("Record [{action}] for wallet [{wallet}] has an invalid amount: {source}")]
    InvalidAmount {
        wallet: String,
        action: String,
        source: NumericError
    },
    #[error("Record [{action}] for wallet [{wallet}] has an invalid asset price: {reason}")]
    InvalidPrice {
        wallet: String,
        action: String,
        reason: String
    },
    #[error("Record [{action}] for wallet [{wallet}] has a negative value")]
    NegativeValue {
        wallet: String,
        action: String
    }
}

impl RecordError {
    pub fn missing_action(wallet: &str) -> Self {
        Self::MissingAction { wallet: wallet.to_string() }
    }

    pub fn missing_timestamp(wallet: &str, action: &str) -> Self {
        Self::MissingTimestamp { wallet: wallet.to_string(), action: action.to_string() }
    }

    pub fn invalid_timestamp(wallet: &str, action: &str, source: NumericError) -> Self {
        Self::InvalidTimestamp { wallet: wallet.to_string(), action: action.to_string(), source }
    }

    pub fn missing_action_data(wallet: &str, action: &str) -> Self {
        Self::MissingActionData { wallet: wallet.to_string(), action: action.to_string() }
    }

    pub fn missing_amount(wallet: &str, action: &str) -> Self {
        Self::MissingAmount { wallet: wallet.to_string(), action: action.to_string() }
    }

    pub fn invalid_amount(wallet: &str, action: &str, source: NumericError) -> Self {
        Self::InvalidAmount { wallet: wallet.to_string(), action: action.to_string(), source }
    }

    pub fn invalid_price(wallet: &str, action: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPrice { wallet: wallet.to_string(), action: action.to_string(), reason: reason.into() }
    }

    pub fn negative_value(wallet: &str, action: &str) -> Self {
        Self::NegativeValue { wallet: wallet.to_string(), action: action.to_string() }
    }
}

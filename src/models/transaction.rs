use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::{AMOUNT_DECIMALS, DEFAULT_ASSET_PRICE_USD};
use crate::models::{ActionType, RecordError};
use crate::types::{NumericField, Timestamp, WalletId};

/// A single element of the input JSON array, before validation.
///
/// Every field is optional so that one incomplete record is reported as a
/// `RecordError` instead of failing the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "userWallet")]
    pub user_wallet: Option<String>,
    pub action: Option<String>,
    pub timestamp: Option<NumericField>,
    #[serde(rename = "actionData")]
    pub action_data: Option<RawActionData>
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActionData {
    pub amount: Option<NumericField>,
    /// Outer `None` when the key is absent, inner `None` when it is `null`.
    #[serde(rename = "assetPriceUSD", default, deserialize_with = "deserialize_present")]
    pub asset_price_usd: Option<Option<NumericField>>
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A validated transaction, valued in USD.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub wallet: WalletId,
    pub action: ActionType,
    pub timestamp: Timestamp,
    /// `amount / 10^6 * price`, saturating at `Decimal::MAX`.
    pub usd_value: Decimal
}

impl Transaction {
    /// Validates one element of the input array.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let raw: RawTransaction = serde_json::from_value(value)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = RecordError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let wallet = match raw.user_wallet {
            Some(wallet) if !wallet.is_empty() => wallet,
            _ => return Err(RecordError::MissingWallet)
        };

        let action = match raw.action.as_deref() {
            Some(action) if !action.is_empty() => ActionType::from(action),
            _ => return Err(RecordError::missing_action(&wallet))
        };

        let name = action.as_str();

        let timestamp = raw.timestamp
            .ok_or_else(|| RecordError::missing_timestamp(&wallet, name))?
            .to_timestamp()
            .map_err(|error| RecordError::invalid_timestamp(&wallet, name, error))?;

        let Some(action_data) = raw.action_data else {
            return Err(RecordError::missing_action_data(&wallet, name))
        };

        let amount = action_data.amount
            .ok_or_else(|| RecordError::missing_amount(&wallet, name))?
            .to_scaled_decimal(AMOUNT_DECIMALS)
            .map_err(|error| RecordError::invalid_amount(&wallet, name, error))?;

        let price = match action_data.asset_price_usd {
            None => DEFAULT_ASSET_PRICE_USD,
            Some(None) => return Err(RecordError::invalid_price(&wallet, name, "price is null")),
            Some(Some(price)) => price.to_decimal()
                .map_err(|error| RecordError::invalid_price(&wallet, name, error.to_string()))?
        };

        if amount < Decimal::ZERO || price < Decimal::ZERO {
            return Err(RecordError::negative_value(&wallet, name))
        }

        let usd_value = amount.saturating_mul(price);

        Ok(Self {
            wallet,
            action,
            timestamp,
            usd_value
        })
    }
}

mod activity;
mod errors;
mod features;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

pub use activity::WalletActivity;
pub use errors::RecordError;
pub use features::{finite_or_zero, FeatureTable, FeatureVector, ScoredTable, ScoredWallet, MODEL_FEATURE_COLUMNS};
pub use transaction::Transaction;

/// Lending protocol action, keyed case-insensitively.
///
/// Unknown actions are kept as `Other` with their lower-cased name so they
/// still count toward totals and the distinct-action set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    Deposit,
    Borrow,
    Repay,
    RedeemUnderlying,
    LiquidationCall,
    Other(String)
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::Deposit => "deposit",
            ActionType::Borrow => "borrow",
            ActionType::Repay => "repay",
            ActionType::RedeemUnderlying => "redeemunderlying",
            ActionType::LiquidationCall => "liquidationcall",
            ActionType::Other(name) => name
        }
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        let name = value.trim().to_lowercase();

        match name.as_str() {
            "deposit" => ActionType::Deposit,
            "borrow" => ActionType::Borrow,
            "repay" => ActionType::Repay,
            "redeemunderlying" => ActionType::RedeemUnderlying,
            "liquidationcall" | "liquidation-call" | "liquidation_call" => ActionType::LiquidationCall,
            _ => ActionType::Other(name)
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

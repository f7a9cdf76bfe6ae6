mod activity_storage;
#[cfg(test)]
mod tests;

use crate::models::WalletActivity;
use crate::types::WalletId;

pub use activity_storage::ActivityStorage;

pub trait Storage: Send + Sync + 'static {
    fn merge(&self, wallet_id: WalletId, activity: WalletActivity);
}

use super::{ActivityStorage, Storage};
use crate::models::{Transaction, WalletActivity};
use anyhow::{anyhow, Result};
use serde_json::json;

fn create_activity(wallet: &str, action: &str, timestamp: i64, amount: &str) -> Result<WalletActivity> {
    let transaction = Transaction::from_value(json!({
        "userWallet": wallet,
        "action": action,
        "timestamp": timestamp,
        "actionData": { "amount": amount }
    }))?;

    let mut activity = WalletActivity::default();
    activity.record(&transaction);

    Ok(activity)
}

#[test]
fn test_storage_basic_merge_operations() -> Result<()> {
    let storage = ActivityStorage::new();

    assert_eq!(storage.wallet_count(), 0);
    assert!(storage.features().is_empty());

    storage.merge("0xabc".to_string(), create_activity("0xabc", "deposit", 1, "1000000")?);

    let features = storage.features();
    let retrieved = features.get("0xabc").ok_or_else(|| anyhow!("Wallet not found in storage"))?;

    assert_eq!(retrieved.total_tx, 1);
    assert_eq!(storage.wallet_count(), 1);

    Ok(())
}

#[test]
fn test_storage_merges_partials_for_the_same_wallet() -> Result<()> {
    let storage = ActivityStorage::new();

    storage.merge("0xabc".to_string(), create_activity("0xabc", "borrow", 10, "2000000")?);
    storage.merge("0xabc".to_string(), create_activity("0xabc", "repay", 86_410, "2000000")?);

    let features = storage.features();
    let wallet = features.get("0xabc").ok_or_else(|| anyhow!("Wallet features missing"))?;

    assert_eq!(storage.wallet_count(), 1);
    assert_eq!(wallet.total_tx, 2);
    assert_eq!(wallet.total_usd_all_actions, 4.0);
    assert_eq!(wallet.repay_borrow_ratio_count, 1.0);
    assert_eq!(wallet.active_days, 1.0);

    Ok(())
}

#[test]
fn test_storage_features_cover_every_wallet() -> Result<()> {
    let storage = ActivityStorage::new();
    storage.merge("a".to_string(), create_activity("a", "deposit", 1, "1")?);
    storage.merge("b".to_string(), create_activity("b", "deposit", 1, "1")?);
    storage.merge("c".to_string(), create_activity("c", "deposit", 1, "1")?);

    let wallets: Vec<String> = storage.features().into_keys().collect();

    assert_eq!(wallets, vec!["a", "b", "c"]);

    Ok(())
}

#[test]
fn test_storage_merge_matches_merging_partials_directly() -> Result<()> {
    let storage = ActivityStorage::new();
    let amount = "50000000000000000000000000000";

    storage.merge("0xwhale".to_string(), create_activity("0xwhale", "deposit", 1, amount)?);
    storage.merge("0xwhale".to_string(), create_activity("0xwhale", "deposit", 2, amount)?);

    let mut single = create_activity("0xwhale", "deposit", 1, amount)?;
    single.merge(create_activity("0xwhale", "deposit", 2, amount)?);

    let features = storage.features();
    let merged = features.get("0xwhale").ok_or_else(|| anyhow!("Wallet features missing"))?;

    assert_eq!(merged.total_tx, 2);
    assert_eq!(*merged, single.features());

    Ok(())
}

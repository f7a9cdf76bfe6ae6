use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::models::{ScoredTable, ScoredWallet};

pub const REPORT_HEADER: [&str; 7] = [
    "wallet",
    "total_tx",
    "total_usd_all_actions",
    "repay_borrow_ratio_count",
    "num_liquidations",
    "active_days",
    "credit_score"
];

/// One line of the output table.
#[derive(Debug, Serialize)]
pub struct ScoreRow<'a> {
    pub wallet: &'a str,
    pub total_tx: u64,
    pub total_usd_all_actions: f64,
    pub repay_borrow_ratio_count: f64,
    pub num_liquidations: u64,
    pub active_days: f64,
    pub credit_score: u32
}

impl<'a> ScoreRow<'a> {
    pub fn new(wallet: &'a str, scored: &ScoredWallet) -> Self {
        Self {
            wallet,
            total_tx: scored.features.total_tx,
            total_usd_all_actions: scored.features.total_usd_all_actions,
            repay_borrow_ratio_count: scored.features.repay_borrow_ratio_count,
            num_liquidations: scored.features.num_liquidations,
            active_days: scored.features.active_days,
            credit_score: scored.credit_score
        }
    }
}

/// Writes the header and one row per wallet, ordered by wallet id.
/// Returns the number of rows written.
pub fn write_scores<W: Write>(writer: W, scores: &ScoredTable) -> Result<usize, csv::Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(REPORT_HEADER)?;

    for (wallet, scored) in scores {
        writer.serialize(ScoreRow::new(wallet, scored))?;
    }

    writer.flush()?;

    Ok(scores.len())
}

pub fn write_scores_to_path(path: impl AsRef<Path>, scores: &ScoredTable) -> Result<usize, csv::Error> {
    let file = std::fs::File::create(path)?;
    write_scores(std::io::BufWriter::new(file), scores)
}

//! Large STX transfer activity from the Hiro transaction feed

use tracing::{debug, instrument, warn};

use alpha_core::{TransferDirection, WhaleActivity, WhaleTransfer};
use alpha_feeds::{HiroClient, TokenTransferTx};

/// 100,000 STX in micro-STX
pub const WHALE_THRESHOLD_MICRO_STX: u128 = 100_000_000_000;

/// Transactions pulled from the feed per request
pub const TRANSFER_FEED_LIMIT: u32 = 50;

const TOP_TRANSFERS: usize = 5;

const MICRO_STX_PER_STX: f64 = 1_000_000.0;

/// Summarize a page of token transfers
///
/// Transfers are not attributed to tracked addresses, so each one counts as
/// inbound and `net_flow` is the sum of the top transfers.
pub fn summarize_transfers(transactions: &[TokenTransferTx]) -> WhaleActivity {
    let large: Vec<&TokenTransferTx> = transactions
        .iter()
        .filter(|tx| tx.amount_micro_stx() >= WHALE_THRESHOLD_MICRO_STX)
        .collect();

    let top_transfers: Vec<WhaleTransfer> = large
        .iter()
        .take(TOP_TRANSFERS)
        .map(|tx| WhaleTransfer {
            amount: tx.amount_micro_stx() as f64 / MICRO_STX_PER_STX,
            direction: TransferDirection::In,
            transaction_id: tx.tx_id.clone(),
        })
        .collect();

    WhaleActivity {
        net_flow: top_transfers.iter().map(|t| t.amount).sum(),
        large_transaction_count: large.len(),
        top_transfers,
    }
}

#[derive(Clone, Default)]
pub struct WhaleTracker {
    hiro: HiroClient,
}

impl WhaleTracker {
    pub fn new(hiro: HiroClient) -> Self {
        Self { hiro }
    }

    /// Recent whale activity; any upstream failure yields zero activity
    #[instrument(skip(self))]
    pub async fn recent_activity(&self) -> WhaleActivity {
        match self.hiro.recent_token_transfers(TRANSFER_FEED_LIMIT).await {
            Ok(transactions) => {
                let activity = summarize_transfers(&transactions);
                debug!(
                    "{} large transfers in last {} txs",
                    activity.large_transaction_count,
                    transactions.len()
                );
                activity
            }
            Err(e) => {
                warn!("Whale activity unavailable: {}", e);
                WhaleActivity::default()
            }
        }
    }
}

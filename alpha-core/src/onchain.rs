//! On-chain economics: looping yield and whale transfer activity

use serde::{Deserialize, Serialize};

/// Leveraged looping yield for sBTC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldData {
    /// APY after leverage and borrow cost, in percent
    pub effective_apy: f64,
    /// Total collateral per unit of initial deposit
    pub collateral_multiple: f64,
    /// Descriptive buffer, e.g. "29.75% price-drop buffer"
    pub liquidation_risk: String,
    /// Unlevered supply APY the model started from
    pub base_apy: f64,
}

impl YieldData {
    /// Price drop (percent) that would trigger liquidation, read back out of
    /// the descriptive `liquidation_risk` string
    pub fn liquidation_threshold_percent(&self) -> Option<f64> {
        self.liquidation_risk
            .split('%')
            .next()
            .and_then(|pct| pct.trim().parse::<f64>().ok())
    }
}

/// Direction of a tracked transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    In,
    Out,
}

/// A single large transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleTransfer {
    /// Amount in whole STX
    pub amount: f64,
    pub direction: TransferDirection,
    pub transaction_id: String,
}

/// Summary of recent large transfers
///
/// `net_flow` is a plain sum of the top transfers. Transfers are not attributed
/// to whale addresses, so every transfer counts as inbound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhaleActivity {
    /// Signed flow in whole STX (positive = accumulation)
    pub net_flow: f64,
    pub large_transaction_count: usize,
    /// At most five transfers, in feed order
    pub top_transfers: Vec<WhaleTransfer>,
}

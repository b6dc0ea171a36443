//! The per-request market snapshot consumed by signal detection and risk assessment

use serde::{Deserialize, Serialize};

use crate::onchain::{WhaleActivity, YieldData};
use crate::price::TokenPrices;
use crate::sentiment::{FearGreed, SentimentData};

/// Prices for the two tracked assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSet {
    pub btc: TokenPrices,
    pub stx: TokenPrices,
}

/// Everything fetched and derived for one request
///
/// Built once after all upstream fetches settle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedData {
    pub prices: PriceSet,
    pub sentiment: SentimentData,
    #[serde(rename = "yield")]
    pub yield_data: YieldData,
    pub whales: WhaleActivity,
    pub fear_greed: FearGreed,
}

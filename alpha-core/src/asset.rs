//! Per-asset upstream identifiers

use serde::{Deserialize, Serialize};

/// Pyth price feed id for BTC/USD
pub const PYTH_BTC_FEED: &str =
    "0xe62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43";

/// Pyth price feed id for STX/USD
pub const PYTH_STX_FEED: &str =
    "0xec7a775f46379b5e943c3526b1c8d54cd49749176b0b98e02dde68d1bd335c17";

/// Identifiers each price source uses for one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSourceIds {
    /// Asset symbol as requested by callers (e.g., "BTC")
    pub symbol: String,
    /// CoinGecko coin id (e.g., "bitcoin")
    pub coingecko: String,
    /// KuCoin trading pair (e.g., "BTC-USDT")
    pub kucoin: String,
    /// CoinPaprika coin id (e.g., "btc-bitcoin")
    pub coinpaprika: String,
    /// Kraken ticker pair (e.g., "BTCUSD")
    pub kraken: String,
    /// Pyth feed id, when the oracle publishes this asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pyth_feed: Option<String>,
}

impl TokenSourceIds {
    pub fn btc() -> Self {
        Self {
            symbol: "BTC".to_string(),
            coingecko: "bitcoin".to_string(),
            kucoin: "BTC-USDT".to_string(),
            coinpaprika: "btc-bitcoin".to_string(),
            kraken: "BTCUSD".to_string(),
            pyth_feed: Some(PYTH_BTC_FEED.to_string()),
        }
    }

    pub fn stx() -> Self {
        Self {
            symbol: "STX".to_string(),
            coingecko: "blockstack".to_string(),
            kucoin: "STX-USDT".to_string(),
            coinpaprika: "stx-stacks".to_string(),
            kraken: "STXUSD".to_string(),
            pyth_feed: Some(PYTH_STX_FEED.to_string()),
        }
    }

    /// The assets the endpoint reports on
    pub fn defaults() -> Vec<Self> {
        vec![Self::btc(), Self::stx()]
    }
}

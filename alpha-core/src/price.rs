//! Multi-source price data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numeric::{round_dp, PERCENT_DP, PRICE_DP};

/// Source whose 24h change is treated as the reference change for an asset
pub const REFERENCE_CHANGE_SOURCE: &str = "coingecko";

/// Kind of upstream a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Smart-contract price oracle read on-chain
    #[serde(rename = "on-chain oracle")]
    OnChainOracle,
    /// Price aggregator (CoinGecko, CoinPaprika)
    #[serde(rename = "aggregator")]
    Aggregator,
    /// Centralized exchange ticker
    #[serde(rename = "exchange")]
    Exchange,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::OnChainOracle => "on-chain oracle",
            SourceKind::Aggregator => "aggregator",
            SourceKind::Exchange => "exchange",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One upstream quote for an asset
///
/// A source either reports a price or an error, never both and never neither.
/// Use [`PriceSource::available`] and [`PriceSource::failed`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSource {
    /// Source identifier (e.g., "pyth", "coingecko")
    pub source_name: String,

    pub source_type: SourceKind,

    /// Price in USD
    pub price: Option<f64>,

    /// 24h change in percent, for sources that report one
    pub change_24h: Option<f64>,

    /// When the upstream observed this price
    pub observed_at: Option<DateTime<Utc>>,

    /// Why this source has no price
    pub error: Option<String>,

    /// Percent deviation from the cross-source average (set once stats exist)
    pub deviation_from_avg: Option<f64>,
}

impl PriceSource {
    /// A source that reported a price
    pub fn available(
        source_name: impl Into<String>,
        source_type: SourceKind,
        price: f64,
        change_24h: Option<f64>,
        observed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            source_type,
            price: Some(price),
            change_24h,
            observed_at,
            error: None,
            deviation_from_avg: None,
        }
    }

    /// A source that failed to report a price
    pub fn failed(
        source_name: impl Into<String>,
        source_type: SourceKind,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            source_type,
            price: None,
            change_24h: None,
            observed_at: None,
            error: Some(error.into()),
            deviation_from_avg: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.price.is_some()
    }
}

/// Cross-source statistics over the sources that reported a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// (max - min) / average * 100
    pub spread_percent: f64,
    pub sources_available: usize,
    pub sources_total: usize,
}

impl PriceStats {
    /// Compute stats from the available prices.
    ///
    /// Returns `None` when no price is available. Figures are rounded to
    /// [`PRICE_DP`] (prices) and [`PERCENT_DP`] (spread).
    pub fn from_prices(prices: &[f64], sources_total: usize) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let average = sorted.iter().sum::<f64>() / count as f64;
        let min = sorted[0];
        let max = sorted[count - 1];

        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let spread_percent = if average != 0.0 {
            (max - min) / average * 100.0
        } else {
            0.0
        };

        Some(Self {
            average: round_dp(average, PRICE_DP),
            median: round_dp(median, PRICE_DP),
            min: round_dp(min, PRICE_DP),
            max: round_dp(max, PRICE_DP),
            spread_percent: round_dp(spread_percent, PERCENT_DP),
            sources_available: count,
            sources_total,
        })
    }
}

/// Aggregated quotes for one asset, captured once per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrices {
    /// Asset symbol (e.g., "BTC")
    pub token: String,
    pub captured_at: DateTime<Utc>,
    /// `None` when no source reported a price
    pub stats: Option<PriceStats>,
    /// Sources in configuration order
    pub sources: Vec<PriceSource>,
}

impl TokenPrices {
    /// Snapshot for an asset with no configured sources
    pub fn empty(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            captured_at: Utc::now(),
            stats: None,
            sources: Vec::new(),
        }
    }

    /// Build the snapshot from settled sources, computing stats and per-source
    /// deviation. Source order is preserved.
    pub fn from_sources(token: impl Into<String>, sources: Vec<PriceSource>) -> Self {
        let prices: Vec<f64> = sources.iter().filter_map(|s| s.price).collect();
        let stats = PriceStats::from_prices(&prices, sources.len());

        let sources = sources
            .into_iter()
            .map(|mut source| {
                if let Some(price) = source.price {
                    source.deviation_from_avg = stats
                        .as_ref()
                        .filter(|s| s.average != 0.0)
                        .map(|s| round_dp((price - s.average) / s.average * 100.0, PERCENT_DP));
                    source.price = Some(round_dp(price, PRICE_DP));
                }
                source
            })
            .collect();

        Self {
            token: token.into(),
            captured_at: Utc::now(),
            stats,
            sources,
        }
    }

    /// Cross-source average, if any source reported
    pub fn average(&self) -> Option<f64> {
        self.stats.as_ref().map(|s| s.average)
    }

    /// Spread percent, treating missing stats as zero spread
    pub fn spread_percent(&self) -> f64 {
        self.stats.as_ref().map(|s| s.spread_percent).unwrap_or(0.0)
    }

    /// 24h change reported by a named source
    pub fn change_24h_from(&self, source_name: &str) -> Option<f64> {
        self.sources
            .iter()
            .find(|s| s.source_name == source_name)
            .and_then(|s| s.change_24h)
    }

    /// 24h change from the reference source
    pub fn reference_change_24h(&self) -> Option<f64> {
        self.change_24h_from(REFERENCE_CHANGE_SOURCE)
    }
}

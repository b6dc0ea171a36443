//! CoinGecko API client
//!
//! Simple-price quotes (with 24h change) for the aggregator, plus coin details
//! for the 7-day change used in sentiment. Free tier, no authentication.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use alpha_core::{SourceKind, TokenSourceIds};

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client, PriceFeed, Quote};

const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API client
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
    last_updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CoinDetails {
    market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    price_change_percentage_7d: Option<f64>,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 7-day price change in percent for a coin id (e.g., "bitcoin")
    #[instrument(skip(self))]
    pub async fn price_change_7d(&self, coin_id: &str) -> Result<Option<f64>, FeedError> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&community_data=false&developer_data=false",
            self.base_url, coin_id
        );
        debug!("[CoinGecko] Fetching coin details: {}", url);

        let details: CoinDetails = fetch_json(self.http.get(&url)).await?;
        Ok(details
            .market_data
            .and_then(|m| m.price_change_percentage_7d))
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Aggregator
    }

    #[instrument(skip(self, token), fields(token = %token.symbol))]
    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true&include_last_updated_at=true",
            self.base_url, token.coingecko
        );
        debug!("[CoinGecko] Fetching simple price: {}", url);

        let mut prices: HashMap<String, SimplePrice> = fetch_json(self.http.get(&url)).await?;
        quote_from_simple_price(prices.remove(&token.coingecko))
    }
}

fn quote_from_simple_price(entry: Option<SimplePrice>) -> Result<Quote, FeedError> {
    let entry = entry.ok_or(FeedError::MissingPrice)?;
    let price = entry.usd.ok_or(FeedError::MissingPrice)?;

    let mut quote = Quote::new(price).with_change_24h(entry.usd_24h_change);
    if let Some(observed) = entry
        .last_updated_at
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    {
        quote = quote.observed_at(observed);
    }

    Ok(quote)
}

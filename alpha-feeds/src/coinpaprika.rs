//! CoinPaprika ticker client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use alpha_core::{SourceKind, TokenSourceIds};

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client, PriceFeed, Quote};

const COINPAPRIKA_API_BASE: &str = "https://api.coinpaprika.com";

#[derive(Clone)]
pub struct CoinPaprikaClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    quotes: Option<TickerQuotes>,
    last_updated: Option<DateTime<Utc>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerQuotes {
    #[serde(rename = "USD")]
    usd: Option<UsdQuote>,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    price: Option<f64>,
    percent_change_24h: Option<f64>,
}

impl CoinPaprikaClient {
    pub fn new() -> Self {
        Self::with_base_url(COINPAPRIKA_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CoinPaprikaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for CoinPaprikaClient {
    fn name(&self) -> &str {
        "coinpaprika"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Aggregator
    }

    #[instrument(skip(self, token), fields(token = %token.symbol))]
    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError> {
        let url = format!("{}/v1/tickers/{}", self.base_url, token.coinpaprika);
        debug!("[CoinPaprika] Fetching ticker: {}", url);

        let ticker: Ticker = fetch_json(self.http.get(&url)).await?;
        quote_from_ticker(ticker)
    }
}

fn quote_from_ticker(ticker: Ticker) -> Result<Quote, FeedError> {
    if let Some(error) = ticker.error {
        return Err(FeedError::Api(error));
    }

    let usd = ticker
        .quotes
        .and_then(|q| q.usd)
        .ok_or(FeedError::MissingPrice)?;
    let price = usd.price.ok_or(FeedError::MissingPrice)?;

    Ok(Quote::new(price)
        .with_change_24h(usd.percent_change_24h)
        .observed_at(ticker.last_updated.unwrap_or_else(Utc::now)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_quote() {
        let json = r#"
        {
            "id": "btc-bitcoin",
            "symbol": "BTC",
            "last_updated": "2024-12-24T00:00:00Z",
            "quotes": {"USD": {"price": 97050.12, "percent_change_24h": 1.5}}
        }
        "#;
        let ticker: Ticker = serde_json::from_str(json).unwrap();

        let quote = quote_from_ticker(ticker).unwrap();
        assert_eq!(quote.price, 97050.12);
        assert_eq!(quote.change_24h, Some(1.5));
        assert_eq!(
            quote.observed_at.unwrap().to_rfc3339(),
            "2024-12-24T00:00:00+00:00"
        );
    }

    #[test]
    fn test_ticker_error() {
        let ticker: Ticker = serde_json::from_str(r#"{"error":"id not found"}"#).unwrap();
        assert_eq!(
            quote_from_ticker(ticker),
            Err(FeedError::Api("id not found".to_string()))
        );
    }
}

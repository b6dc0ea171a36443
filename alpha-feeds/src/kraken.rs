//! Kraken public ticker client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use alpha_core::{SourceKind, TokenSourceIds};

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client, parse_price, PriceFeed, Quote};

const KRAKEN_API_BASE: &str = "https://api.kraken.com";

#[derive(Clone)]
pub struct KrakenClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, PairTicker>,
}

#[derive(Debug, Deserialize)]
struct PairTicker {
    /// Last trade closed: [price, lot volume]
    #[serde(default)]
    c: Vec<String>,
}

impl KrakenClient {
    pub fn new() -> Self {
        Self::with_base_url(KRAKEN_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for KrakenClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for KrakenClient {
    fn name(&self) -> &str {
        "kraken"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Exchange
    }

    #[instrument(skip(self, token), fields(token = %token.symbol))]
    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError> {
        let url = format!("{}/0/public/Ticker?pair={}", self.base_url, token.kraken);
        debug!("[Kraken] Fetching ticker: {}", url);

        let response: TickerResponse = fetch_json(self.http.get(&url)).await?;
        quote_from_ticker(response)
    }
}

fn quote_from_ticker(response: TickerResponse) -> Result<Quote, FeedError> {
    if let Some(error) = response.error.into_iter().next() {
        return Err(FeedError::Api(error));
    }

    // Kraken keys results by its own pair name (e.g., XXBTZUSD), so take the
    // single entry rather than looking up the requested pair.
    let last = response
        .result
        .into_values()
        .next()
        .and_then(|ticker| ticker.c.into_iter().next())
        .ok_or(FeedError::MissingPrice)?;

    Ok(Quote::new(parse_price(&last)?).observed_at(Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_quote() {
        let json = r#"
        {
            "error": [],
            "result": {
                "XXBTZUSD": {
                    "a": ["97101.10000", "1", "1.000"],
                    "b": ["97101.00000", "1", "1.000"],
                    "c": ["97101.10000", "0.00100000"]
                }
            }
        }
        "#;
        let response: TickerResponse = serde_json::from_str(json).unwrap();

        let quote = quote_from_ticker(response).unwrap();
        assert_eq!(quote.price, 97101.1);
        assert!(quote.change_24h.is_none());
    }

    #[test]
    fn test_ticker_error() {
        let json = r#"{"error":["EQuery:Unknown asset pair"]}"#;
        let response: TickerResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            quote_from_ticker(response),
            Err(FeedError::Api("EQuery:Unknown asset pair".to_string()))
        );
    }

    #[test]
    fn test_zero_price_is_missing() {
        let json = r#"{"error":[],"result":{"STXUSD":{"c":["0.00000","0"]}}}"#;
        let response: TickerResponse = serde_json::from_str(json).unwrap();
        assert_eq!(quote_from_ticker(response), Err(FeedError::MissingPrice));
    }
}

//! KuCoin level-1 orderbook ticker

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use alpha_core::{SourceKind, TokenSourceIds};

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client, parse_price, PriceFeed, Quote};

const KUCOIN_API_BASE: &str = "https://api.kucoin.com";

/// Response code KuCoin uses for success
const KUCOIN_OK: &str = "200000";

#[derive(Clone)]
pub struct KuCoinClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Level1Response {
    code: String,
    msg: Option<String>,
    data: Option<Level1>,
}

#[derive(Debug, Deserialize)]
struct Level1 {
    price: Option<String>,
    /// Milliseconds since epoch
    time: Option<i64>,
}

impl KuCoinClient {
    pub fn new() -> Self {
        Self::with_base_url(KUCOIN_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for KuCoinClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for KuCoinClient {
    fn name(&self) -> &str {
        "kucoin"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Exchange
    }

    #[instrument(skip(self, token), fields(token = %token.symbol))]
    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError> {
        let url = format!(
            "{}/api/v1/market/orderbook/level1?symbol={}",
            self.base_url, token.kucoin
        );
        debug!("[KuCoin] Fetching level1: {}", url);

        let response: Level1Response = fetch_json(self.http.get(&url)).await?;
        quote_from_level1(response)
    }
}

fn quote_from_level1(response: Level1Response) -> Result<Quote, FeedError> {
    if response.code != KUCOIN_OK {
        return Err(FeedError::Api(
            response.msg.unwrap_or_else(|| format!("KuCoin code {}", response.code)),
        ));
    }

    let data = response.data.ok_or(FeedError::MissingPrice)?;
    let price = parse_price(data.price.as_deref().ok_or(FeedError::MissingPrice)?)?;

    let observed = data
        .time
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(Quote::new(price).observed_at(observed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level1_quote() {
        let json = r#"{"code":"200000","data":{"time":1735000000123,"sequence":"1","price":"0.6543","size":"10"}}"#;
        let response: Level1Response = serde_json::from_str(json).unwrap();

        let quote = quote_from_level1(response).unwrap();
        assert_eq!(quote.price, 0.6543);
        assert_eq!(quote.observed_at.unwrap().timestamp_millis(), 1_735_000_000_123);
    }

    #[test]
    fn test_level1_error_code() {
        let json = r#"{"code":"400100","msg":"Unsupported trading pair."}"#;
        let response: Level1Response = serde_json::from_str(json).unwrap();

        assert_eq!(
            quote_from_level1(response),
            Err(FeedError::Api("Unsupported trading pair.".to_string()))
        );
    }

    #[test]
    fn test_level1_null_data() {
        let json = r#"{"code":"200000","data":null}"#;
        let response: Level1Response = serde_json::from_str(json).unwrap();
        assert_eq!(quote_from_level1(response), Err(FeedError::MissingPrice));
    }
}

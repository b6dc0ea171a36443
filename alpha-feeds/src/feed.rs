//! The price feed abstraction shared by every quote source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use alpha_core::{SourceKind, TokenSourceIds};

use crate::error::FeedError;

/// Default HTTP timeout for upstream requests
const HTTP_TIMEOUT_SECS: u64 = 15;

const USER_AGENT: &str = "AlphaIntelligence/1.0";

/// A successful quote from one source
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub change_24h: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            change_24h: None,
            observed_at: None,
        }
    }

    pub fn with_change_24h(mut self, change_24h: Option<f64>) -> Self {
        self.change_24h = change_24h;
        self
    }

    pub fn observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }
}

/// An independent source of USD prices
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Identifier reported in `PriceSource::source_name`
    fn name(&self) -> &str;

    fn kind(&self) -> SourceKind;

    /// Whether this source has an identifier for the asset. Unsupported
    /// assets are skipped entirely rather than reported as failures.
    fn supports(&self, _token: &TokenSourceIds) -> bool {
        true
    }

    /// Deadline after which the aggregator gives up on this source
    fn timeout(&self) -> Option<Duration> {
        None
    }

    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError>;
}

/// Build the HTTP client used by the REST feeds
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Send a request and decode a JSON body, mapping each failure mode to a
/// [`FeedError`]
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FeedError> {
    let response = request
        .send()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FeedError::Http(response.status().as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FeedError::Parse(e.to_string()))
}

/// Parse a decimal string quote, treating zero as no price
pub(crate) fn parse_price(raw: &str) -> Result<f64, FeedError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FeedError::Parse(format!("invalid price '{}'", raw)))?;

    if price > 0.0 && price.is_finite() {
        Ok(price)
    } else {
        Err(FeedError::MissingPrice)
    }
}

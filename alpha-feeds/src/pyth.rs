//! Pyth oracle price feed, read on-chain through the Stacks storage contract

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;
use tracing::{debug, instrument};

use alpha_core::{SourceKind, TokenSourceIds};

use crate::clarity::{buffer_argument, decode_price};
use crate::error::FeedError;
use crate::feed::{PriceFeed, Quote};
use crate::hiro::{HiroClient, ReadOnlyResponse};

/// Deadline for the on-chain read
pub const ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Location of the Pyth storage contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythConfig {
    pub storage_address: String,
    pub storage_name: String,
    pub function_name: String,
}

impl Default for PythConfig {
    fn default() -> Self {
        Self {
            storage_address: "SP1CGXWEAMG6P6FT04W66NVGJ7PQWMDAC19R7PJ0Y".to_string(),
            storage_name: "pyth-storage-v4".to_string(),
            function_name: "get-price".to_string(),
        }
    }
}

/// Pyth on-chain oracle feed
#[derive(Clone)]
pub struct PythOracleFeed {
    hiro: HiroClient,
    config: PythConfig,
}

impl PythOracleFeed {
    pub fn new(hiro: HiroClient, config: PythConfig) -> Self {
        Self { hiro, config }
    }
}

#[async_trait]
impl PriceFeed for PythOracleFeed {
    fn name(&self) -> &str {
        "pyth"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::OnChainOracle
    }

    fn supports(&self, token: &TokenSourceIds) -> bool {
        token.pyth_feed.is_some()
    }

    fn timeout(&self) -> Option<Duration> {
        Some(ORACLE_TIMEOUT)
    }

    #[instrument(skip(self, token), fields(token = %token.symbol))]
    async fn fetch_quote(&self, token: &TokenSourceIds) -> Result<Quote, FeedError> {
        let feed_id = token
            .pyth_feed
            .as_deref()
            .ok_or_else(|| FeedError::Api("No Pyth feed".to_string()))?;

        let argument = buffer_argument(feed_id)?;
        let response = self
            .hiro
            .call_read_only(
                &self.config.storage_address,
                &self.config.storage_name,
                &self.config.function_name,
                &self.config.storage_address,
                &[argument],
            )
            .await?;

        let result = match response {
            ReadOnlyResponse {
                okay: true,
                result: Some(result),
                ..
            } => result,
            ReadOnlyResponse { cause, .. } => {
                return Err(FeedError::Api(
                    cause.unwrap_or_else(|| "No Pyth feed".to_string()),
                ))
            }
        };

        let price = decode_price(&result)?
            .to_f64()
            .ok_or(FeedError::MissingPrice)?;
        debug!("[Pyth] {} = {}", token.symbol, price);

        Ok(Quote::new(price).observed_at(Utc::now()))
    }
}

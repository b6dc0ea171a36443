//! Fear & Greed index from alternative.me

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use alpha_core::FearGreed;

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client};

const FEAR_GREED_API_BASE: &str = "https://api.alternative.me";

#[derive(Clone)]
pub struct FearGreedClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
}

impl FearGreedClient {
    pub fn new() -> Self {
        Self::with_base_url(FEAR_GREED_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Latest index reading
    #[instrument(skip(self))]
    pub async fn latest(&self) -> Result<FearGreed, FeedError> {
        let url = format!("{}/fng/?limit=1", self.base_url);
        debug!("[FearGreed] Fetching index: {}", url);

        let response: FngResponse = fetch_json(self.http.get(&url)).await?;
        index_from_response(response)
    }
}

impl Default for FearGreedClient {
    fn default() -> Self {
        Self::new()
    }
}

fn index_from_response(response: FngResponse) -> Result<FearGreed, FeedError> {
    let entry = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::Parse("empty fear & greed data".to_string()))?;

    let value: u8 = entry
        .value
        .trim()
        .parse()
        .map_err(|_| FeedError::Parse(format!("invalid index value '{}'", entry.value)))?;

    Ok(FearGreed::new(value, entry.value_classification))
}

//! Hiro Stacks API client
//!
//! Used for read-only contract calls (the Pyth oracle), the recent
//! token-transfer feed (whale activity) and transaction lookups (payment
//! verification).

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::FeedError;
use crate::feed::{fetch_json, http_client};

/// Base URL for the Hiro mainnet API
pub const HIRO_API_BASE: &str = "https://api.hiro.so";

/// Hiro API client
#[derive(Clone)]
pub struct HiroClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ReadOnlyRequest<'a> {
    sender: &'a str,
    arguments: &'a [String],
}

/// Result of a read-only contract call
#[derive(Debug, Clone, Deserialize)]
pub struct ReadOnlyResponse {
    pub okay: bool,
    /// Hex-encoded Clarity value when `okay`
    pub result: Option<String>,
    /// Failure reason when not `okay`
    pub cause: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionList {
    #[serde(default)]
    results: Vec<TokenTransferTx>,
}

/// Entry of the recent transactions feed
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTransferTx {
    pub tx_id: String,
    #[serde(default)]
    pub sender_address: Option<String>,
    #[serde(default)]
    pub token_transfer: Option<TokenTransfer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenTransfer {
    /// Amount in micro-STX, as a decimal string
    pub amount: String,
    #[serde(default)]
    pub recipient_address: Option<String>,
}

impl TokenTransferTx {
    /// Transfer amount in micro-STX, zero when absent or unparseable
    pub fn amount_micro_stx(&self) -> u128 {
        self.token_transfer
            .as_ref()
            .and_then(|t| t.amount.parse().ok())
            .unwrap_or(0)
    }
}

/// Details of a single transaction
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDetail {
    pub tx_id: String,
    pub tx_status: String,
    pub tx_type: String,
    pub sender_address: String,
    #[serde(default)]
    pub contract_call: Option<ContractCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractCall {
    pub contract_id: String,
    pub function_name: String,
}

impl HiroClient {
    /// Create a client for the Hiro mainnet API
    pub fn new() -> Self {
        Self::with_base_url(HIRO_API_BASE)
    }

    /// Create a client against a different Hiro-compatible deployment
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call a read-only contract function
    #[instrument(skip(self, arguments))]
    pub async fn call_read_only(
        &self,
        contract_address: &str,
        contract_name: &str,
        function_name: &str,
        sender: &str,
        arguments: &[String],
    ) -> Result<ReadOnlyResponse, FeedError> {
        let url = format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.base_url, contract_address, contract_name, function_name
        );
        debug!("[Hiro] Read-only call: {}", url);

        fetch_json(
            self.http
                .post(&url)
                .json(&ReadOnlyRequest { sender, arguments }),
        )
        .await
    }

    /// Most recent token-transfer transactions
    #[instrument(skip(self))]
    pub async fn recent_token_transfers(&self, limit: u32) -> Result<Vec<TokenTransferTx>, FeedError> {
        let url = format!(
            "{}/extended/v1/tx?limit={}&type=token_transfer",
            self.base_url, limit
        );
        debug!("[Hiro] Fetching recent token transfers: {}", url);

        let list: TransactionList = fetch_json(self.http.get(&url)).await?;
        Ok(list.results)
    }

    /// Look up a transaction by id. `Ok(None)` when the API does not know it.
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, tx_id: &str) -> Result<Option<TransactionDetail>, FeedError> {
        let url = format!("{}/extended/v1/tx/{}", self.base_url, tx_id);
        debug!("[Hiro] Fetching transaction: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Ok(None),
            status if !status.is_success() => Err(FeedError::Http(status.as_u16())),
            _ => response
                .json()
                .await
                .map(Some)
                .map_err(|e| FeedError::Parse(e.to_string())),
        }
    }
}

impl Default for HiroClient {
    fn default() -> Self {
        Self::new()
    }
}

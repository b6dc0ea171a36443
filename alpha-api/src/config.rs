//! Server configuration from environment variables

use std::env;

use alpha_feeds::HIRO_API_BASE;
use alpha_services::{PaymentContract, DEFAULT_BASE_APY};

const DEFAULT_PORT: u16 = 3402;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Runtime configuration for the API server
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub hiro_api_url: String,
    /// Template summaries are used when unset
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub base_apy: f64,
    pub payment: PaymentContract,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Recognized:
    /// - SERVER_PORT (default 3402)
    /// - HIRO_API_URL (default Hiro mainnet)
    /// - OPENAI_API_KEY, OPENAI_MODEL (default gpt-4o-mini)
    /// - BASE_APY (default 5.0)
    /// - PAYMENT_CONTRACT_ADDRESS, PAYMENT_CONTRACT_NAME, PAYMENT_RECIPIENT
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("SERVER_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber {
                field: "SERVER_PORT".to_string(),
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let base_apy = match var("BASE_APY") {
            Some(raw) => match raw.parse::<f64>() {
                Ok(apy) if apy.is_finite() => apy,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        field: "BASE_APY".to_string(),
                        value: raw,
                    })
                }
            },
            None => DEFAULT_BASE_APY,
        };

        let defaults = PaymentContract::default();
        let payment = PaymentContract {
            address: var("PAYMENT_CONTRACT_ADDRESS").unwrap_or(defaults.address),
            name: var("PAYMENT_CONTRACT_NAME").unwrap_or(defaults.name),
            recipient: var("PAYMENT_RECIPIENT").unwrap_or(defaults.recipient),
        };

        Ok(Self {
            port,
            hiro_api_url: var("HIRO_API_URL").unwrap_or_else(|| HIRO_API_BASE.to_string()),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_apy,
            payment,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid number in {field}: '{value}'")]
    InvalidNumber { field: String, value: String },
}

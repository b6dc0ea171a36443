//! Error types for the alpha endpoint

use thiserror::Error;

/// Endpoint-wide error type
#[derive(Error, Debug)]
pub enum AlphaError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Payment error: {0}")]
    Payment(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AlphaError {
    pub fn api(msg: impl Into<String>) -> Self {
        AlphaError::Api(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        AlphaError::Parse(msg.into())
    }

    pub fn payment(msg: impl Into<String>) -> Self {
        AlphaError::Payment(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AlphaError::Internal(msg.into())
    }
}

/// Result type alias for alpha operations
pub type AlphaResult<T> = Result<T, AlphaError>;

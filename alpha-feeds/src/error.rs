//! Error types for upstream feeds

use thiserror::Error;

use crate::clarity::ClarityError;

/// Errors an upstream source can report
///
/// Callers never propagate these past the aggregation layer: a failing source
/// becomes an error-tagged entry in the response instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Upstream reported an error in an otherwise valid response
    #[error("{0}")]
    Api(String),

    /// Response was valid but carried no price
    #[error("No price in response")]
    MissingPrice,

    /// Source did not answer within its deadline
    #[error("Timeout")]
    Timeout,

    /// On-chain result buffer could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] ClarityError),
}

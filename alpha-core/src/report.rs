//! Report payloads returned to paying callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AlphaError, AlphaResult};
use crate::onchain::{WhaleActivity, YieldData};
use crate::sentiment::{SentimentClass, SentimentData};
use crate::signal::{OverallRisk, RiskAssessment, Signal, SignalAction};
use crate::snapshot::PriceSet;

/// Outcome of checking a payment transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Sender address of the payment transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

impl PaymentVerification {
    pub fn valid(caller: impl Into<String>) -> Self {
        Self {
            valid: true,
            error: None,
            caller: Some(caller.into()),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            caller: None,
        }
    }

    /// The paying caller, or `AlphaError::Payment` with the rejection reason
    pub fn into_caller(self) -> AlphaResult<String> {
        match (self.valid, self.caller) {
            (true, Some(caller)) => Ok(caller),
            _ => Err(AlphaError::payment(
                self.error.unwrap_or_else(|| "Payment not verified".to_string()),
            )),
        }
    }
}

/// Headline figures at the top of a full report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub btc_price: f64,
    pub stx_price: f64,
    pub btc_change_24h: Option<f64>,
    pub stx_change_24h: Option<f64>,
    /// Formatted spread, e.g. "0.12%"
    pub price_spread_btc: String,
    pub price_spread_stx: String,
    pub sentiment: SentimentClass,
    pub fear_greed: u8,
}

/// Raw inputs the report was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSources {
    pub prices: PriceSet,
    pub sentiment: SentimentData,
    pub whale_activity: WhaleActivity,
}

/// Full alpha report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaReport {
    pub timestamp: DateTime<Utc>,
    pub payment_verified: bool,
    pub caller: String,
    pub market_snapshot: MarketSnapshot,
    pub signals: Vec<Signal>,
    pub alpha_summary: String,
    pub risk_assessment: RiskAssessment,
    pub yield_opportunity: Option<YieldData>,
    pub data_sources: DataSources,
}

/// One-line figures for the quick report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickSnapshot {
    /// e.g. "$97123 (-1.2%)"
    pub btc: String,
    /// e.g. "$0.6543"
    pub stx: String,
    pub sentiment: SentimentClass,
    /// e.g. "45 (Fear)"
    pub fear_greed: String,
}

/// Lighter report without whale activity or a written summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReport {
    pub timestamp: DateTime<Utc>,
    pub payment_verified: bool,
    pub caller: String,
    pub quick_snapshot: QuickSnapshot,
    /// Top three signals
    pub signals: Vec<Signal>,
    pub risk: OverallRisk,
    /// Action of the first signal, or hold
    pub action: SignalAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payment_yields_caller() {
        let caller = PaymentVerification::valid("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7")
            .into_caller()
            .unwrap();
        assert_eq!(caller, "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
    }

    #[test]
    fn test_rejected_payment_is_payment_error() {
        match PaymentVerification::invalid("Wrong contract").into_caller() {
            Err(AlphaError::Payment(reason)) => assert_eq!(reason, "Wrong contract"),
            other => panic!("expected payment error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_without_caller_is_rejected() {
        let verification = PaymentVerification {
            valid: true,
            error: None,
            caller: None,
        };
        assert!(matches!(
            verification.into_caller(),
            Err(AlphaError::Payment(_))
        ));
    }
}

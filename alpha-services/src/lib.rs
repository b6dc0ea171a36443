//! Business logic services for Alpha Intelligence
//!
//! This crate turns upstream data into reports:
//! - Price aggregation across the configured feeds
//! - Sentiment, yield and whale activity
//! - Signal detection and risk assessment (pure functions of the snapshot)
//! - Payment verification and report composition

pub mod alpha_service;
pub mod payment;
pub mod price_aggregator;
pub mod risk;
pub mod sentiment;
pub mod signal_detector;
pub mod whale_tracker;
pub mod yield_model;

pub use alpha_service::{market_snapshot, quick_snapshot, AlphaService};
pub use payment::{
    check_transaction, normalize_txid, PaymentContract, PaymentVerifier, FULL_REPORT_PRICE,
    PAYMENT_FUNCTION, QUICK_REPORT_PRICE,
};
pub use price_aggregator::PriceAggregator;
pub use risk::assess_risk;
pub use sentiment::{estimate_sentiment, SentimentEstimator};
pub use signal_detector::detect_signals;
pub use whale_tracker::{summarize_transfers, WhaleTracker};
pub use yield_model::{calculate_yield, DEFAULT_BASE_APY};

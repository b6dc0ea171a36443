//! Core types for the Alpha Intelligence endpoint
//!
//! This crate defines the shared data structures used across the workspace:
//! multi-source price snapshots, sentiment, yield and whale activity, the
//! aggregated per-request snapshot, signals, risk, and report payloads.

pub mod asset;
pub mod error;
pub mod numeric;
pub mod onchain;
pub mod price;
pub mod report;
pub mod sentiment;
pub mod signal;
pub mod snapshot;

pub use asset::TokenSourceIds;
pub use error::{AlphaError, AlphaResult};
pub use onchain::{TransferDirection, WhaleActivity, WhaleTransfer, YieldData};
pub use price::{PriceSource, PriceStats, SourceKind, TokenPrices, REFERENCE_CHANGE_SOURCE};
pub use report::{
    AlphaReport, DataSources, MarketSnapshot, PaymentVerification, QuickReport, QuickSnapshot,
};
pub use sentiment::{FearGreed, SentimentClass, SentimentData};
pub use signal::{
    LiquidationRisk, OverallRisk, RiskAssessment, Severity, Signal, SignalAction, SignalType,
    VolatilityRegime,
};
pub use snapshot::{AggregatedData, PriceSet};

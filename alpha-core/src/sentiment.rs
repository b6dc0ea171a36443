//! Market sentiment data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete sentiment bucket derived from price momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentClass {
    VeryBearish,
    Bearish,
    Neutral,
    Bullish,
    VeryBullish,
}

impl SentimentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentClass::VeryBearish => "very_bearish",
            SentimentClass::Bearish => "bearish",
            SentimentClass::Neutral => "neutral",
            SentimentClass::Bullish => "bullish",
            SentimentClass::VeryBullish => "very_bullish",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Crypto Fear & Greed Index reading (0 = extreme fear, 100 = extreme greed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FearGreed {
    pub value: u8,
    pub label: String,
}

impl FearGreed {
    pub fn new(value: u8, label: impl Into<String>) -> Self {
        Self {
            value: value.min(100),
            label: label.into(),
        }
    }
}

impl Default for FearGreed {
    /// Substituted whenever the index cannot be fetched
    fn default() -> Self {
        Self {
            value: 50,
            label: "Neutral".to_string(),
        }
    }
}

/// Blended sentiment estimate for the primary asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentData {
    pub sentiment_class: SentimentClass,
    /// 0 - 100
    pub score: u8,
    pub confidence: f64,
    pub fear_greed_index: u8,
    pub fear_greed_label: String,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
}

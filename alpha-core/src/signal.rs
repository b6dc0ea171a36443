//! Trading signals and risk classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of signal the detector can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    SentimentDivergence,
    YieldOpportunity,
    WhaleAccumulation,
    WhaleDistribution,
    PriceArbitrage,
    MomentumShift,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::SentimentDivergence => "sentiment_divergence",
            SignalType::YieldOpportunity => "yield_opportunity",
            SignalType::WhaleAccumulation => "whale_accumulation",
            SignalType::WhaleDistribution => "whale_distribution",
            SignalType::PriceArbitrage => "price_arbitrage",
            SignalType::MomentumShift => "momentum_shift",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Suggested reaction to a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Accumulate,
    Hold,
    Reduce,
    DeployCapital,
    Wait,
    Arbitrage,
}

impl SignalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Accumulate => "accumulate",
            SignalAction::Hold => "hold",
            SignalAction::Reduce => "reduce",
            SignalAction::DeployCapital => "deploy_capital",
            SignalAction::Wait => "wait",
            SignalAction::Arbitrage => "arbitrage",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected trading signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub severity: Severity,
    pub description: String,
    pub action: SignalAction,
}

impl Signal {
    pub fn new(
        signal_type: SignalType,
        severity: Severity,
        description: impl Into<String>,
        action: SignalAction,
    ) -> Self {
        Self {
            signal_type,
            severity,
            description: description.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallRisk {
    Low,
    Moderate,
    High,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidationRisk {
    Low,
    Moderate,
    High,
}

/// Volatility regime inferred from cross-source price spreads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    Low,
    Normal,
    High,
    Extreme,
}

impl OverallRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRisk::Low => "low",
            OverallRisk::Moderate => "moderate",
            OverallRisk::High => "high",
            OverallRisk::Extreme => "extreme",
        }
    }
}

impl VolatilityRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityRegime::Low => "low",
            VolatilityRegime::Normal => "normal",
            VolatilityRegime::High => "high",
            VolatilityRegime::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall: OverallRisk,
    pub liquidation_risk: LiquidationRisk,
    pub volatility_regime: VolatilityRegime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_wire_format() {
        let signal = Signal::new(
            SignalType::YieldOpportunity,
            Severity::High,
            "yield",
            SignalAction::DeployCapital,
        );
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "yield_opportunity");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["action"], "deploy_capital");
    }
}

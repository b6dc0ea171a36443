//! Risk assessment over an aggregated snapshot

use alpha_core::{AggregatedData, LiquidationRisk, OverallRisk, RiskAssessment, VolatilityRegime};

/// Classify volatility from the mean cross-source spread (percent)
pub fn volatility_regime(average_spread: f64) -> VolatilityRegime {
    if average_spread < 0.2 {
        VolatilityRegime::Low
    } else if average_spread < 0.5 {
        VolatilityRegime::Normal
    } else if average_spread < 1.0 {
        VolatilityRegime::High
    } else {
        VolatilityRegime::Extreme
    }
}

/// Classify liquidation risk from the price-drop buffer (percent)
pub fn liquidation_risk(threshold_percent: Option<f64>) -> LiquidationRisk {
    match threshold_percent {
        Some(pct) if pct > 20.0 => LiquidationRisk::Low,
        Some(pct) if pct > 10.0 => LiquidationRisk::Moderate,
        _ => LiquidationRisk::High,
    }
}

/// Combine the Fear & Greed reading with the volatility regime
pub fn overall_risk(fear_greed: u8, volatility: VolatilityRegime) -> OverallRisk {
    if !(20..=80).contains(&fear_greed) {
        if volatility == VolatilityRegime::Extreme {
            OverallRisk::Extreme
        } else {
            OverallRisk::High
        }
    } else if !(35..=65).contains(&fear_greed) {
        if volatility == VolatilityRegime::High {
            OverallRisk::High
        } else {
            OverallRisk::Moderate
        }
    } else if volatility == VolatilityRegime::Low {
        OverallRisk::Low
    } else {
        OverallRisk::Moderate
    }
}

pub fn assess_risk(data: &AggregatedData) -> RiskAssessment {
    let average_spread =
        (data.prices.btc.spread_percent() + data.prices.stx.spread_percent()) / 2.0;
    let volatility = volatility_regime(average_spread);

    RiskAssessment {
        overall: overall_risk(data.fear_greed.value, volatility),
        liquidation_risk: liquidation_risk(data.yield_data.liquidation_threshold_percent()),
        volatility_regime: volatility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_detector::tests::calm_data;
    use alpha_core::{FearGreed, PriceSource, SourceKind, TokenPrices};

    #[test]
    fn test_volatility_bands() {
        assert_eq!(volatility_regime(0.0), VolatilityRegime::Low);
        assert_eq!(volatility_regime(0.2), VolatilityRegime::Normal);
        assert_eq!(volatility_regime(0.75), VolatilityRegime::High);
        assert_eq!(volatility_regime(1.0), VolatilityRegime::Extreme);
    }

    #[test]
    fn test_liquidation_bands() {
        assert_eq!(liquidation_risk(Some(29.75)), LiquidationRisk::Low);
        assert_eq!(liquidation_risk(Some(15.0)), LiquidationRisk::Moderate);
        assert_eq!(liquidation_risk(Some(10.0)), LiquidationRisk::High);
        assert_eq!(liquidation_risk(None), LiquidationRisk::High);
    }

    #[test]
    fn test_overall_combinations() {
        assert_eq!(overall_risk(15, VolatilityRegime::Extreme), OverallRisk::Extreme);
        assert_eq!(overall_risk(85, VolatilityRegime::Low), OverallRisk::High);
        assert_eq!(overall_risk(30, VolatilityRegime::High), OverallRisk::High);
        assert_eq!(overall_risk(70, VolatilityRegime::Extreme), OverallRisk::Moderate);
        assert_eq!(overall_risk(50, VolatilityRegime::Low), OverallRisk::Low);
        assert_eq!(overall_risk(50, VolatilityRegime::Normal), OverallRisk::Moderate);
        // Band edges are inclusive on the calm side
        assert_eq!(overall_risk(20, VolatilityRegime::Low), OverallRisk::Moderate);
        assert_eq!(overall_risk(35, VolatilityRegime::Low), OverallRisk::Low);
    }

    #[test]
    fn test_assess_snapshot() {
        let mut data = calm_data();
        data.fear_greed = FearGreed::new(15, "Extreme Fear");
        // 3% spread on BTC, 0 on STX -> mean 1.5
        data.prices.btc = TokenPrices::from_sources(
            "BTC",
            vec![
                PriceSource::available("a", SourceKind::Exchange, 98.5, None, None),
                PriceSource::available("b", SourceKind::Exchange, 101.5, None, None),
            ],
        );

        let risk = assess_risk(&data);
        assert_eq!(risk.volatility_regime, VolatilityRegime::Extreme);
        assert_eq!(risk.overall, OverallRisk::Extreme);
        assert_eq!(risk.liquidation_risk, LiquidationRisk::Low);
    }

    #[test]
    fn test_assess_calm_snapshot() {
        let risk = assess_risk(&calm_data());
        assert_eq!(risk.volatility_regime, VolatilityRegime::Low);
        assert_eq!(risk.overall, OverallRisk::Low);
    }

    #[test]
    fn test_unparseable_buffer_is_high_risk() {
        let mut data = calm_data();
        data.yield_data.liquidation_risk = "n/a".to_string();
        assert_eq!(assess_risk(&data).liquidation_risk, LiquidationRisk::High);
    }
}

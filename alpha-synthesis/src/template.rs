//! Deterministic summary used when no model is configured or the model fails

use alpha_core::SignalAction;

use crate::SynthesisContext;

/// 24h move (percent) beyond which BTC is described as trending
const TREND_THRESHOLD: f64 = 3.0;

/// Effective APY (percent) above which the yield is called out
const ATTRACTIVE_APY: f64 = 7.0;

pub fn template_summary(ctx: &SynthesisContext<'_>) -> String {
    let data = ctx.data;

    let btc_price = data
        .prices
        .btc
        .average()
        .map(|avg| format!("{:.0}", avg))
        .unwrap_or_else(|| "N/A".to_string());
    let btc_change = data.prices.btc.reference_change_24h().unwrap_or(0.0);

    let market_state = if btc_change > TREND_THRESHOLD {
        "rallying"
    } else if btc_change < -TREND_THRESHOLD {
        "pulling back"
    } else {
        "consolidating"
    };

    let fear_greed = data.fear_greed.value;
    let sentiment_note = if fear_greed < 30 {
        "Extreme fear presents potential buying opportunity.".to_string()
    } else if fear_greed > 70 {
        "Extreme greed suggests caution - consider taking profits.".to_string()
    } else {
        format!("Market sentiment is {}.", data.sentiment.sentiment_class)
    };

    let action_note = match ctx.signals.first().map(|s| s.action) {
        None => String::new(),
        Some(SignalAction::Accumulate) => "Conditions favor accumulation.".to_string(),
        Some(SignalAction::Reduce) => "Consider reducing exposure.".to_string(),
        Some(SignalAction::DeployCapital) => format!(
            "sBTC yield at {}% APY offers attractive returns.",
            data.yield_data.effective_apy
        ),
        Some(SignalAction::Arbitrage) => "Price discrepancies across exchanges detected.".to_string(),
        Some(SignalAction::Hold | SignalAction::Wait) => "Monitor for clearer signals.".to_string(),
    };

    let yield_note = if data.yield_data.effective_apy > ATTRACTIVE_APY {
        format!(
            " sBTC yield at {}% APY with a {}.",
            data.yield_data.effective_apy, data.yield_data.liquidation_risk
        )
    } else {
        String::new()
    };

    format!(
        "BTC {} at ${} ({}{:.1}% 24h). {} {}{}",
        market_state,
        btc_price,
        if btc_change >= 0.0 { "+" } else { "" },
        btc_change,
        sentiment_note,
        action_note,
        yield_note
    )
}

//! Rule-based signal detection over an aggregated snapshot

use alpha_core::{AggregatedData, Severity, Signal, SignalAction, SignalType};

const DIVERGENCE_BULLISH_SCORE: u8 = 60;
const DIVERGENCE_BEARISH_SCORE: u8 = 40;
const DIVERGENCE_MOVE: f64 = 2.0;

const YIELD_SIGNAL_APY: f64 = 7.0;
const YIELD_HIGH_APY: f64 = 10.0;

const WHALE_MIN_TRANSACTIONS: usize = 3;
/// Net flow in STX
const WHALE_NET_FLOW: f64 = 500_000.0;

const ARBITRAGE_SPREAD: f64 = 0.5;
const ARBITRAGE_HIGH_SPREAD: f64 = 1.0;

const EXTREME_FEAR: u8 = 25;
const EXTREME_GREED: u8 = 75;

/// Evaluate every rule in order and collect the signals that fire
pub fn detect_signals(data: &AggregatedData) -> Vec<Signal> {
    let mut signals = Vec::new();

    let score = data.sentiment.score;
    let change_24h = data.sentiment.change_24h.unwrap_or(0.0);

    // Sentiment vs price divergence
    if score > DIVERGENCE_BULLISH_SCORE && change_24h < -DIVERGENCE_MOVE {
        signals.push(Signal::new(
            SignalType::SentimentDivergence,
            Severity::Medium,
            "Bullish sentiment despite price decline - potential accumulation zone",
            SignalAction::Accumulate,
        ));
    } else if score < DIVERGENCE_BEARISH_SCORE && change_24h > DIVERGENCE_MOVE {
        signals.push(Signal::new(
            SignalType::SentimentDivergence,
            Severity::Medium,
            "Bearish sentiment despite price rise - potential distribution phase",
            SignalAction::Reduce,
        ));
    }

    let apy = data.yield_data.effective_apy;
    if apy > YIELD_SIGNAL_APY {
        signals.push(Signal::new(
            SignalType::YieldOpportunity,
            if apy > YIELD_HIGH_APY {
                Severity::High
            } else {
                Severity::Medium
            },
            format!(
                "sBTC yield at {}% APY with {}x loop - above average",
                apy, data.yield_data.collateral_multiple
            ),
            SignalAction::DeployCapital,
        ));
    }

    let whales = &data.whales;
    if whales.large_transaction_count > WHALE_MIN_TRANSACTIONS {
        if whales.net_flow > WHALE_NET_FLOW {
            signals.push(Signal::new(
                SignalType::WhaleAccumulation,
                Severity::High,
                format!(
                    "{} large transactions detected with {:.2}M STX net flow",
                    whales.large_transaction_count,
                    whales.net_flow / 1_000_000.0
                ),
                SignalAction::Accumulate,
            ));
        } else if whales.net_flow < -WHALE_NET_FLOW {
            signals.push(Signal::new(
                SignalType::WhaleDistribution,
                Severity::High,
                format!(
                    "{} large transactions detected with {:.2}M STX outflow",
                    whales.large_transaction_count,
                    whales.net_flow.abs() / 1_000_000.0
                ),
                SignalAction::Reduce,
            ));
        }
    }

    let btc_spread = data.prices.btc.spread_percent();
    let stx_spread = data.prices.stx.spread_percent();
    if btc_spread > ARBITRAGE_SPREAD || stx_spread > ARBITRAGE_SPREAD {
        let (token, spread) = if btc_spread > stx_spread {
            ("BTC", btc_spread)
        } else {
            ("STX", stx_spread)
        };
        signals.push(Signal::new(
            SignalType::PriceArbitrage,
            if spread > ARBITRAGE_HIGH_SPREAD {
                Severity::High
            } else {
                Severity::Medium
            },
            format!("{} showing {:.2}% price spread across exchanges", token, spread),
            SignalAction::Arbitrage,
        ));
    }

    let fear_greed = data.fear_greed.value;
    if fear_greed < EXTREME_FEAR {
        signals.push(Signal::new(
            SignalType::MomentumShift,
            Severity::High,
            format!(
                "Extreme Fear ({}) - historically good accumulation zone",
                fear_greed
            ),
            SignalAction::Accumulate,
        ));
    } else if fear_greed > EXTREME_GREED {
        signals.push(Signal::new(
            SignalType::MomentumShift,
            Severity::Medium,
            format!("Extreme Greed ({}) - consider taking profits", fear_greed),
            SignalAction::Reduce,
        ));
    }

    signals
}

//! Report composition for the paid endpoints

use chrono::Utc;
use tracing::{info, instrument, warn};

use alpha_core::{
    AggregatedData, AlphaReport, DataSources, FearGreed, MarketSnapshot, OverallRisk, PriceSet,
    QuickReport, QuickSnapshot, Signal, SignalAction, TokenPrices, WhaleActivity,
};
use alpha_feeds::FearGreedClient;
use alpha_synthesis::{SummaryGenerator, SynthesisContext};

use crate::price_aggregator::PriceAggregator;
use crate::risk::assess_risk;
use crate::sentiment::SentimentEstimator;
use crate::signal_detector::detect_signals;
use crate::whale_tracker::WhaleTracker;
use crate::yield_model::{calculate_yield, DEFAULT_BASE_APY};

/// Signals included in a quick report
const QUICK_SIGNAL_LIMIT: usize = 3;

/// Composes full and quick reports from the underlying services
#[derive(Clone)]
pub struct AlphaService {
    prices: PriceAggregator,
    sentiment: SentimentEstimator,
    whales: WhaleTracker,
    fear_greed: FearGreedClient,
    summary: SummaryGenerator,
    base_apy: f64,
}

impl AlphaService {
    pub fn new(
        prices: PriceAggregator,
        sentiment: SentimentEstimator,
        whales: WhaleTracker,
        fear_greed: FearGreedClient,
        summary: SummaryGenerator,
    ) -> Self {
        Self {
            prices,
            sentiment,
            whales,
            fear_greed,
            summary,
            base_apy: DEFAULT_BASE_APY,
        }
    }

    pub fn with_base_apy(mut self, base_apy: f64) -> Self {
        self.base_apy = base_apy;
        self
    }

    pub fn prices(&self) -> &PriceAggregator {
        &self.prices
    }

    pub fn uses_ai_summary(&self) -> bool {
        self.summary.uses_openai()
    }

    /// Full report for a verified caller
    #[instrument(skip(self))]
    pub async fn full_report(&self, caller: &str) -> AlphaReport {
        info!("Building full alpha report");

        let (btc, stx, whales, fear_greed) = tokio::join!(
            self.prices.fetch_token_prices("BTC"),
            self.prices.fetch_token_prices("STX"),
            self.whales.recent_activity(),
            self.fear_greed_index()
        );

        let data = self.aggregate(btc, stx, whales, fear_greed).await;
        let signals = detect_signals(&data);
        let risk = assess_risk(&data);

        let alpha_summary = self
            .summary
            .summarize(SynthesisContext {
                data: &data,
                signals: &signals,
                risk: &risk,
            })
            .await;

        info!(
            "Full report: {} signals, {} risk",
            signals.len(),
            risk.overall.as_str()
        );

        AlphaReport {
            timestamp: Utc::now(),
            payment_verified: true,
            caller: caller.to_string(),
            market_snapshot: market_snapshot(&data),
            signals,
            alpha_summary,
            risk_assessment: risk,
            yield_opportunity: Some(data.yield_data),
            data_sources: DataSources {
                prices: data.prices,
                sentiment: data.sentiment,
                whale_activity: data.whales,
            },
        }
    }

    /// Lighter report: no whale activity and no summary
    #[instrument(skip(self))]
    pub async fn quick_report(&self, caller: &str) -> QuickReport {
        info!("Building quick alpha report");

        let (btc, stx, fear_greed) = tokio::join!(
            self.prices.fetch_token_prices("BTC"),
            self.prices.fetch_token_prices("STX"),
            self.fear_greed_index()
        );

        let data = self
            .aggregate(btc, stx, WhaleActivity::default(), fear_greed)
            .await;
        let signals = detect_signals(&data);
        let risk = assess_risk(&data);

        quick_report(caller, &data, signals, risk.overall)
    }

    async fn aggregate(
        &self,
        btc: TokenPrices,
        stx: TokenPrices,
        whales: WhaleActivity,
        fear_greed: FearGreed,
    ) -> AggregatedData {
        let sentiment = self.sentiment.estimate(&btc, &stx).await;

        AggregatedData {
            prices: PriceSet { btc, stx },
            sentiment,
            yield_data: calculate_yield(self.base_apy),
            whales,
            fear_greed,
        }
    }

    async fn fear_greed_index(&self) -> FearGreed {
        self.fear_greed.latest().await.unwrap_or_else(|e| {
            warn!("Fear & Greed unavailable: {}", e);
            FearGreed::default()
        })
    }
}

fn format_spread(prices: &TokenPrices) -> String {
    match &prices.stats {
        Some(stats) => format!("{:.2}%", stats.spread_percent),
        None => "0%".to_string(),
    }
}

pub fn market_snapshot(data: &AggregatedData) -> MarketSnapshot {
    let PriceSet { btc, stx } = &data.prices;

    MarketSnapshot {
        btc_price: btc.average().unwrap_or(0.0),
        stx_price: stx.average().unwrap_or(0.0),
        btc_change_24h: btc.reference_change_24h(),
        stx_change_24h: stx.reference_change_24h(),
        price_spread_btc: format_spread(btc),
        price_spread_stx: format_spread(stx),
        sentiment: data.sentiment.sentiment_class,
        fear_greed: data.sentiment.fear_greed_index,
    }
}

pub fn quick_snapshot(data: &AggregatedData) -> QuickSnapshot {
    let PriceSet { btc, stx } = &data.prices;

    let btc_price = btc
        .average()
        .map(|avg| format!("{:.0}", avg))
        .unwrap_or_else(|| "N/A".to_string());
    let btc_change = btc
        .reference_change_24h()
        .map(|c| format!("{:.1}", c))
        .unwrap_or_else(|| "0".to_string());
    let stx_price = stx
        .average()
        .map(|avg| format!("{:.4}", avg))
        .unwrap_or_else(|| "N/A".to_string());

    QuickSnapshot {
        btc: format!("${} ({}%)", btc_price, btc_change),
        stx: format!("${}", stx_price),
        sentiment: data.sentiment.sentiment_class,
        fear_greed: format!("{} ({})", data.fear_greed.value, data.fear_greed.label),
    }
}

fn quick_report(
    caller: &str,
    data: &AggregatedData,
    mut signals: Vec<Signal>,
    risk: OverallRisk,
) -> QuickReport {
    let action = signals
        .first()
        .map(|s| s.action)
        .unwrap_or(SignalAction::Hold);
    signals.truncate(QUICK_SIGNAL_LIMIT);

    QuickReport {
        timestamp: Utc::now(),
        payment_verified: true,
        caller: caller.to_string(),
        quick_snapshot: quick_snapshot(data),
        signals,
        risk,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_detector::tests::calm_data;
    use alpha_core::{PriceSource, SentimentClass, SourceKind};

    fn with_coingecko(token: &str, price: f64, change: f64) -> TokenPrices {
        TokenPrices::from_sources(
            token,
            vec![
                PriceSource::available("pyth", SourceKind::OnChainOracle, price, None, None),
                PriceSource::available("coingecko", SourceKind::Aggregator, price, Some(change), None),
            ],
        )
    }

    #[test]
    fn test_market_snapshot() {
        let mut data = calm_data();
        data.prices.btc = with_coingecko("BTC", 97_123.4, -1.25);
        data.prices.stx = TokenPrices::empty("STX");
        data.sentiment.sentiment_class = SentimentClass::Bearish;
        data.sentiment.fear_greed_index = 31;

        let snapshot = market_snapshot(&data);
        assert_eq!(snapshot.btc_price, 97_123.4);
        assert_eq!(snapshot.btc_change_24h, Some(-1.25));
        assert_eq!(snapshot.price_spread_btc, "0.00%");
        assert_eq!(snapshot.stx_price, 0.0);
        assert_eq!(snapshot.stx_change_24h, None);
        assert_eq!(snapshot.price_spread_stx, "0%");
        assert_eq!(snapshot.sentiment, SentimentClass::Bearish);
        assert_eq!(snapshot.fear_greed, 31);
    }

    #[test]
    fn test_quick_snapshot_formatting() {
        let mut data = calm_data();
        data.prices.btc = with_coingecko("BTC", 97_123.4, 2.04);
        data.prices.stx = with_coingecko("STX", 0.654321, 0.0);

        let snapshot = quick_snapshot(&data);
        assert_eq!(snapshot.btc, "$97123 (2.0%)");
        assert_eq!(snapshot.stx, "$0.6543");
        assert_eq!(snapshot.fear_greed, "50 (Neutral)");
    }

    #[test]
    fn test_quick_snapshot_without_prices() {
        let mut data = calm_data();
        data.prices.btc = TokenPrices::empty("BTC");
        data.prices.stx = TokenPrices::empty("STX");

        let snapshot = quick_snapshot(&data);
        assert_eq!(snapshot.btc, "$N/A (0%)");
        assert_eq!(snapshot.stx, "$N/A");
    }

    #[test]
    fn test_quick_report_keeps_top_three() {
        let mut data = calm_data();
        data.yield_data.effective_apy = 12.0;
        data.fear_greed = FearGreed::new(10, "Extreme Fear");
        data.whales.large_transaction_count = 5;
        data.whales.net_flow = 900_000.0;
        data.sentiment.score = 80;
        data.sentiment.change_24h = Some(-4.0);

        let signals = detect_signals(&data);
        assert_eq!(signals.len(), 4);

        let report = quick_report("SP123", &data, signals, OverallRisk::High);
        assert_eq!(report.signals.len(), 3);
        assert_eq!(report.action, SignalAction::Accumulate);
        assert_eq!(report.risk, OverallRisk::High);
        assert!(report.payment_verified);
        assert_eq!(report.caller, "SP123");
    }

    #[test]
    fn test_quick_report_defaults_to_hold() {
        let data = calm_data();
        let report = quick_report("SP123", &data, Vec::new(), OverallRisk::Low);
        assert_eq!(report.action, SignalAction::Hold);
        assert!(report.signals.is_empty());
    }
}

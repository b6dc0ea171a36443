//! Aggregation through signals and risk, against fake feeds and a local stub
//! upstream. No external network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use alpha_core::{
    AggregatedData, FearGreed, OverallRisk, PriceSet, Severity, SignalType, SourceKind,
    TokenSourceIds, VolatilityRegime,
};
use alpha_feeds::{
    CoinGeckoClient, CoinPaprikaClient, FeedError, KrakenClient, KuCoinClient, PriceFeed, Quote,
};
use alpha_services::{
    assess_risk, calculate_yield, detect_signals, estimate_sentiment, summarize_transfers,
    PriceAggregator, DEFAULT_BASE_APY,
};

/// Fixed-price feed that counts how often it is queried
struct FixedFeed {
    name: &'static str,
    price: f64,
    calls: Arc<AtomicUsize>,
}

impl FixedFeed {
    fn new(name: &'static str, price: f64) -> Self {
        Self {
            name,
            price,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl PriceFeed for FixedFeed {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Exchange
    }

    async fn fetch_quote(&self, _token: &TokenSourceIds) -> Result<Quote, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Quote::new(self.price))
    }
}

/// Oracle stand-in that never answers within its deadline
struct StalledOracle;

#[async_trait]
impl PriceFeed for StalledOracle {
    fn name(&self) -> &str {
        "pyth"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::OnChainOracle
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_millis(200))
    }

    async fn fetch_quote(&self, _token: &TokenSourceIds) -> Result<Quote, FeedError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Quote::new(1.0))
    }
}

/// Canned upstream responses keyed by path
fn stub_route(path: &str) -> (&'static str, &'static str) {
    if path.starts_with("/simple/price") {
        (
            "200 OK",
            r#"{"bitcoin":{"usd":100.0,"usd_24h_change":-2.5,"last_updated_at":1735000000}}"#,
        )
    } else if path.starts_with("/api/v1/market/orderbook/level1") {
        ("200 OK", "{not json")
    } else if path.starts_with("/v1/tickers") {
        ("500 Internal Server Error", r#"{"error":"upstream down"}"#)
    } else if path.starts_with("/0/public/Ticker") {
        (
            "200 OK",
            r#"{"error":[],"result":{"XXBTZUSD":{"c":["102.00000","0.1"]}}}"#,
        )
    } else {
        ("404 Not Found", "{}")
    }
}

/// Serve [`stub_route`] on a loopback port and return its base URL
async fn spawn_stub_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = stub_route(&path);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_failures_degrade_only_their_own_source() {
    let base = spawn_stub_upstream().await;

    let feeds: Vec<Arc<dyn PriceFeed>> = vec![
        Arc::new(StalledOracle),
        Arc::new(CoinGeckoClient::with_base_url(&base)),
        Arc::new(KuCoinClient::with_base_url(&base)),
        Arc::new(CoinPaprikaClient::with_base_url(&base)),
        Arc::new(KrakenClient::with_base_url(&base)),
    ];
    let aggregator = PriceAggregator::new(feeds, TokenSourceIds::defaults());

    let btc = aggregator.fetch_token_prices("btc").await;
    assert_eq!(btc.token, "BTC");

    let names: Vec<&str> = btc.sources.iter().map(|s| s.source_name.as_str()).collect();
    assert_eq!(names, vec!["pyth", "coingecko", "kucoin", "coinpaprika", "kraken"]);

    // Timeout
    assert_eq!(btc.sources[0].error.as_deref(), Some("Timeout"));
    // Malformed JSON
    assert!(btc.sources[2]
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("Parse error")));
    // HTTP error
    assert_eq!(btc.sources[3].error.as_deref(), Some("HTTP error: 500"));

    // Every source carries exactly one of price or error
    for source in &btc.sources {
        assert_ne!(source.price.is_some(), source.error.is_some());
    }

    assert_eq!(btc.sources[1].price, Some(100.0));
    assert_eq!(btc.sources[4].price, Some(102.0));
    assert_eq!(btc.reference_change_24h(), Some(-2.5));

    let stats = btc.stats.expect("two sources answered");
    assert_eq!(stats.sources_available, 2);
    assert_eq!(stats.sources_total, 5);
    assert_eq!(stats.average, 101.0);
    assert_eq!(stats.median, 101.0);
    assert_eq!(stats.spread_percent, 1.9802);
    assert_eq!(btc.sources[1].deviation_from_avg, Some(-0.9901));
}

#[tokio::test]
async fn test_unsupported_asset_makes_no_calls() {
    let feed = FixedFeed::new("kraken", 1.0);
    let calls = feed.calls.clone();
    let aggregator = PriceAggregator::new(vec![Arc::new(feed)], TokenSourceIds::defaults());

    let doge = aggregator.fetch_token_prices("DOGE").await;
    assert!(doge.stats.is_none());
    assert!(doge.sources.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    aggregator.fetch_token_prices("STX").await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_snapshot_to_signals_and_risk() {
    let feeds: Vec<Arc<dyn PriceFeed>> = vec![
        Arc::new(FixedFeed::new("kucoin", 99.0)),
        Arc::new(FixedFeed::new("kraken", 101.0)),
    ];
    let aggregator = PriceAggregator::new(feeds, TokenSourceIds::defaults());

    let btc = aggregator.fetch_token_prices("BTC").await;
    let stx = aggregator.fetch_token_prices("STX").await;
    assert_eq!(btc.spread_percent(), 2.0);

    let fear_greed = FearGreed::new(15, "Extreme Fear");
    let data = AggregatedData {
        sentiment: estimate_sentiment(Some(-5.0), Some(-4.0), &fear_greed),
        prices: PriceSet { btc, stx },
        yield_data: calculate_yield(DEFAULT_BASE_APY),
        whales: summarize_transfers(&[]),
        fear_greed,
    };

    let signals = detect_signals(&data);
    let types: Vec<SignalType> = signals.iter().map(|s| s.signal_type).collect();
    assert_eq!(
        types,
        vec![
            SignalType::YieldOpportunity,
            SignalType::PriceArbitrage,
            SignalType::MomentumShift,
        ]
    );
    assert!(signals.iter().all(|s| s.severity == Severity::High));

    // Both assets spread 2% -> arbitrage reports the later one on a tie
    assert!(signals[1].description.starts_with("STX showing 2.00%"));

    let risk = assess_risk(&data);
    assert_eq!(risk.volatility_regime, VolatilityRegime::Extreme);
    assert_eq!(risk.overall, OverallRisk::Extreme);
}

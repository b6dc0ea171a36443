//! Multi-source price aggregation
//!
//! Fans out to every configured [`PriceFeed`] for an asset, degrades failing
//! sources to error-tagged entries and computes cross-source statistics.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use alpha_core::{PriceSource, TokenPrices, TokenSourceIds};
use alpha_feeds::{
    CoinGeckoClient, CoinPaprikaClient, FeedError, HiroClient, KrakenClient, KuCoinClient,
    PriceFeed, PythConfig, PythOracleFeed, Quote,
};

/// Aggregates quotes for the configured assets across all feeds
#[derive(Clone)]
pub struct PriceAggregator {
    feeds: Vec<Arc<dyn PriceFeed>>,
    tokens: Vec<TokenSourceIds>,
}

impl PriceAggregator {
    /// Create an aggregator over the given feeds, queried in order
    pub fn new(feeds: Vec<Arc<dyn PriceFeed>>, tokens: Vec<TokenSourceIds>) -> Self {
        Self { feeds, tokens }
    }

    /// The production source set: Pyth oracle first, then the REST sources
    pub fn with_default_feeds(hiro: HiroClient, pyth: PythConfig) -> Self {
        let feeds: Vec<Arc<dyn PriceFeed>> = vec![
            Arc::new(PythOracleFeed::new(hiro, pyth)),
            Arc::new(CoinGeckoClient::new()),
            Arc::new(KuCoinClient::new()),
            Arc::new(CoinPaprikaClient::new()),
            Arc::new(KrakenClient::new()),
        ];
        Self::new(feeds, TokenSourceIds::defaults())
    }

    pub fn feed_names(&self) -> Vec<&str> {
        self.feeds.iter().map(|f| f.name()).collect()
    }

    /// Identifiers for a symbol, case-insensitive
    pub fn token(&self, symbol: &str) -> Option<&TokenSourceIds> {
        let symbol = symbol.to_uppercase();
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    /// Fetch and aggregate prices for one asset
    ///
    /// Unknown symbols return an empty snapshot without touching any feed.
    #[instrument(skip(self))]
    pub async fn fetch_token_prices(&self, symbol: &str) -> TokenPrices {
        let Some(token) = self.token(symbol) else {
            warn!("No source identifiers for {}", symbol);
            return TokenPrices::empty(symbol.to_uppercase());
        };

        let futures = self
            .feeds
            .iter()
            .filter(|feed| feed.supports(token))
            .map(|feed| {
                let feed: &dyn PriceFeed = feed.as_ref();
                async move {
                    let result = fetch_with_deadline(feed, token).await;
                    source_from_result(feed, result)
                }
            });

        let sources = join_all(futures).await;
        let prices = TokenPrices::from_sources(token.symbol.clone(), sources);

        info!(
            "{}: {}/{} sources available",
            prices.token,
            prices.sources.iter().filter(|s| s.is_available()).count(),
            prices.sources.len()
        );
        prices
    }
}

/// Query a feed, racing it against its deadline when it has one
async fn fetch_with_deadline(
    feed: &dyn PriceFeed,
    token: &TokenSourceIds,
) -> Result<Quote, FeedError> {
    match feed.timeout() {
        Some(deadline) => race_deadline(feed.fetch_quote(token), deadline).await,
        None => feed.fetch_quote(token).await,
    }
}

/// Whichever of the request and the timer settles first wins; the other is
/// dropped
async fn race_deadline<F>(request: F, deadline: Duration) -> Result<Quote, FeedError>
where
    F: std::future::Future<Output = Result<Quote, FeedError>>,
{
    tokio::select! {
        result = request => result,
        _ = tokio::time::sleep(deadline) => Err(FeedError::Timeout),
    }
}

fn source_from_result(feed: &dyn PriceFeed, result: Result<Quote, FeedError>) -> PriceSource {
    match result {
        Ok(quote) => {
            debug!("[{}] {}", feed.name(), quote.price);
            PriceSource::available(
                feed.name(),
                feed.kind(),
                quote.price,
                quote.change_24h,
                quote.observed_at,
            )
        }
        Err(e) => {
            warn!("[{}] source failed: {}", feed.name(), e);
            PriceSource::failed(feed.name(), feed.kind(), e.to_string())
        }
    }
}

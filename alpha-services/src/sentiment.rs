//! Market sentiment from momentum blended with the Fear & Greed index

use tracing::{debug, instrument, warn};

use alpha_core::{FearGreed, SentimentClass, SentimentData, TokenPrices};
use alpha_feeds::{CoinGeckoClient, FearGreedClient};

/// Fixed confidence reported with every estimate
pub const SENTIMENT_CONFIDENCE: f64 = 0.7;

/// Classify momentum and blend the bucket score with the index
///
/// `momentum = change_24h + change_7d / 2`, missing changes count as zero.
pub fn estimate_sentiment(
    change_24h: Option<f64>,
    change_7d: Option<f64>,
    fear_greed: &FearGreed,
) -> SentimentData {
    let momentum = change_24h.unwrap_or(0.0) + change_7d.unwrap_or(0.0) / 2.0;

    let (sentiment_class, bucket_score) = if momentum < -10.0 {
        (SentimentClass::VeryBearish, 15u16)
    } else if momentum < -3.0 {
        (SentimentClass::Bearish, 35)
    } else if momentum < 3.0 {
        (SentimentClass::Neutral, 50)
    } else if momentum < 10.0 {
        (SentimentClass::Bullish, 65)
    } else {
        (SentimentClass::VeryBullish, 85)
    };

    // Halves round up
    let score = ((bucket_score + u16::from(fear_greed.value) + 1) / 2) as u8;

    SentimentData {
        sentiment_class,
        score,
        confidence: SENTIMENT_CONFIDENCE,
        fear_greed_index: fear_greed.value,
        fear_greed_label: fear_greed.label.clone(),
        change_24h,
        change_7d,
    }
}

/// Fetches the auxiliary inputs and produces [`SentimentData`]
#[derive(Clone)]
pub struct SentimentEstimator {
    coingecko: CoinGeckoClient,
    fear_greed: FearGreedClient,
    primary_coin_id: String,
}

impl SentimentEstimator {
    pub fn new(coingecko: CoinGeckoClient, fear_greed: FearGreedClient) -> Self {
        Self {
            coingecko,
            fear_greed,
            primary_coin_id: "bitcoin".to_string(),
        }
    }

    pub fn with_primary_coin(mut self, coin_id: impl Into<String>) -> Self {
        self.primary_coin_id = coin_id.into();
        self
    }

    /// Estimate sentiment for the primary asset
    ///
    /// The 24h change comes from the CoinGecko entry of `primary`. The 7-day
    /// change and index are fetched concurrently; failures fall back to no
    /// 7-day change and a neutral index.
    #[instrument(skip_all)]
    pub async fn estimate(&self, primary: &TokenPrices, _secondary: &TokenPrices) -> SentimentData {
        let (change_7d, fear_greed) = tokio::join!(
            self.coingecko.price_change_7d(&self.primary_coin_id),
            self.fear_greed.latest()
        );

        let change_7d = change_7d.unwrap_or_else(|e| {
            warn!("7d change unavailable: {}", e);
            None
        });
        let fear_greed = fear_greed.unwrap_or_else(|e| {
            warn!("Fear & Greed unavailable: {}", e);
            FearGreed::default()
        });

        let sentiment = estimate_sentiment(primary.reference_change_24h(), change_7d, &fear_greed);
        debug!(
            "Sentiment {} (score {})",
            sentiment.sentiment_class, sentiment.score
        );
        sentiment
    }
}

impl Default for SentimentEstimator {
    fn default() -> Self {
        Self::new(CoinGeckoClient::new(), FearGreedClient::new())
    }
}

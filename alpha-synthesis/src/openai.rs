use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use alpha_core::{AlphaError, AlphaResult};
use tracing::{debug, instrument};

use crate::SynthesisContext;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str =
    "You are a concise crypto market analyst. Give actionable insights only.";

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);

        Self {
            client: Client::with_config(config),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a 2-3 sentence summary of the snapshot
    #[instrument(skip(self, ctx))]
    pub async fn alpha_summary(&self, ctx: &SynthesisContext<'_>) -> AlphaResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| AlphaError::internal(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(summary_prompt(ctx))
                    .build()
                    .map_err(|e| AlphaError::internal(e.to_string()))?
                    .into(),
            ])
            .temperature(0.7)
            .max_tokens(200u32)
            .build()
            .map_err(|e| AlphaError::internal(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AlphaError::api(format!("OpenAI API error: {}", e)))?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AlphaError::parse("No response from OpenAI"))?;

        debug!("AI summary: {} chars", summary.len());
        Ok(summary.to_string())
    }
}

fn summary_prompt(ctx: &SynthesisContext<'_>) -> String {
    let data = ctx.data;

    let btc_price = data
        .prices
        .btc
        .average()
        .map(|avg| format!("{:.0}", avg))
        .unwrap_or_else(|| "N/A".to_string());
    let btc_change = data
        .prices
        .btc
        .reference_change_24h()
        .map(|c| format!("{:.1}", c))
        .unwrap_or_else(|| "0".to_string());
    let stx_price = data
        .prices
        .stx
        .average()
        .map(|avg| format!("{:.4}", avg))
        .unwrap_or_else(|| "N/A".to_string());

    let signals = ctx
        .signals
        .iter()
        .map(|s| format!("- {}: {} ({})", s.signal_type.as_str(), s.description, s.action))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a crypto market analyst. Generate a 2-3 sentence actionable alpha summary.

Market Data:
- BTC: ${} ({}% 24h)
- STX: ${}
- Fear & Greed: {} ({})
- Sentiment: {} (score: {})
- sBTC Yield: {}% APY
- Whale Activity: {} large txs, {:.2}M STX net flow

Signals Detected:
{}

Risk: {} overall, {} volatility

Provide actionable insight in 2-3 sentences. Be specific. No fluff."#,
        btc_price,
        btc_change,
        stx_price,
        data.fear_greed.value,
        data.fear_greed.label,
        data.sentiment.sentiment_class,
        data.sentiment.score,
        data.yield_data.effective_apy,
        data.whales.large_transaction_count,
        data.whales.net_flow / 1_000_000.0,
        signals,
        ctx.risk.overall.as_str(),
        ctx.risk.volatility_regime.as_str(),
    )
}

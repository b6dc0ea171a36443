//! Alpha summary generation
//!
//! Turns the aggregated snapshot, detected signals and risk assessment into a
//! short human-readable summary. Uses an OpenAI chat model when a key is
//! configured and always falls back to a deterministic template.

pub mod openai;
pub mod template;

use alpha_core::{AggregatedData, RiskAssessment, Signal};
use tracing::{debug, warn};

pub use openai::OpenAIClient;
pub use template::template_summary;

/// Inputs to a summary
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub data: &'a AggregatedData,
    pub signals: &'a [Signal],
    pub risk: &'a RiskAssessment,
}

/// Produces the `alpha_summary` text of a full report
#[derive(Debug, Clone, Default)]
pub struct SummaryGenerator {
    openai: Option<OpenAIClient>,
}

impl SummaryGenerator {
    /// Template-only generator
    pub fn template_only() -> Self {
        Self { openai: None }
    }

    pub fn with_openai(client: OpenAIClient) -> Self {
        Self {
            openai: Some(client),
        }
    }

    pub fn uses_openai(&self) -> bool {
        self.openai.is_some()
    }

    pub async fn summarize(&self, ctx: SynthesisContext<'_>) -> String {
        if let Some(client) = &self.openai {
            match client.alpha_summary(&ctx).await {
                Ok(summary) => return summary,
                Err(e) => warn!("AI summary failed, using template: {}", e),
            }
        }

        debug!("Generating template summary");
        template_summary(&ctx)
    }
}

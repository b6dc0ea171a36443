//! Alpha Intelligence API Server
//!
//! Payment-gated HTTP endpoints serving multi-source market intelligence.

mod config;
mod routes;

use axum::http::{header, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use alpha_feeds::{FearGreedClient, HiroClient, PythConfig};
use alpha_services::{
    AlphaService, PaymentVerifier, PriceAggregator, SentimentEstimator, WhaleTracker,
};
use alpha_synthesis::{OpenAIClient, SummaryGenerator};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub alpha: Arc<AlphaService>,
    pub verifier: Arc<PaymentVerifier>,
}

impl AppState {
    /// Wire up clients and services from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let hiro = HiroClient::with_base_url(&config.hiro_api_url);

        let summary = match &config.openai_api_key {
            Some(key) => {
                SummaryGenerator::with_openai(OpenAIClient::new(key).with_model(&config.openai_model))
            }
            None => SummaryGenerator::template_only(),
        };

        let alpha = AlphaService::new(
            PriceAggregator::with_default_feeds(hiro.clone(), PythConfig::default()),
            SentimentEstimator::default(),
            WhaleTracker::new(hiro.clone()),
            FearGreedClient::new(),
            summary,
        )
        .with_base_apy(config.base_apy);

        Self {
            alpha: Arc::new(alpha),
            verifier: Arc::new(PaymentVerifier::new(hiro, config.payment.clone())),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,alpha_api=debug")),
        )
        .init();

    info!("Starting Alpha Intelligence API");

    let config = AppConfig::from_env()?;

    if config.openai_api_key.is_some() {
        info!("OpenAI key found - summaries use {}", config.openai_model);
    } else {
        info!("No OPENAI_API_KEY set - summaries use the template");
    }
    info!(
        "Payments via {} (base APY {}%)",
        config.payment.contract_id(),
        config.base_apy
    );

    let state = AppState::from_config(&config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(routes::PAYMENT_HEADER),
        ]);

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

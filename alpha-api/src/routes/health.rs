//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    price_sources: Vec<String>,
    summary: &'static str,
    payment_contract: String,
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        price_sources: state
            .alpha
            .prices()
            .feed_names()
            .into_iter()
            .map(String::from)
            .collect(),
        summary: if state.alpha.uses_ai_summary() {
            "openai"
        } else {
            "template"
        },
        payment_contract: state.verifier.contract().contract_id(),
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}

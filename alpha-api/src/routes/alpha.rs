//! Paid report endpoints
//!
//! Callers pay by calling the payment contract on-chain, then retry with the
//! transaction id in the `X-Payment` header.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use alpha_core::AlphaError;
use alpha_services::{PaymentContract, FULL_REPORT_PRICE, PAYMENT_FUNCTION, QUICK_REPORT_PRICE};

use crate::AppState;

/// Header carrying the payment transaction id
pub const PAYMENT_HEADER: &str = "x-payment";

/// How long a payment quote stays valid
const PAYMENT_QUOTE_MINUTES: i64 = 10;

/// Create report routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/alpha", post(full_report))
        .route("/alpha/quick", get(quick_report))
}

/// Payment terms returned with a 402
#[derive(Debug, Serialize)]
struct PaymentTerms {
    contract: String,
    function: &'static str,
    /// Micro-STX
    price: u64,
    token: &'static str,
    recipient: String,
    network: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequired {
    error: &'static str,
    code: &'static str,
    resource: &'static str,
    payment: PaymentTerms,
    instructions: [&'static str; 3],
    nonce: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct VerificationFailed {
    error: &'static str,
    details: String,
}

fn payment_required(resource: &'static str, price: u64, contract: &PaymentContract) -> PaymentRequired {
    PaymentRequired {
        error: "Payment Required",
        code: "PAYMENT_REQUIRED",
        resource,
        payment: PaymentTerms {
            contract: contract.contract_id(),
            function: PAYMENT_FUNCTION,
            price,
            token: "STX",
            recipient: contract.recipient.clone(),
            network: "mainnet",
        },
        instructions: [
            "1. Call the contract function with STX payment",
            "2. Wait for transaction confirmation",
            "3. Retry request with X-Payment header containing txid",
        ],
        nonce: uuid::Uuid::new_v4().to_string(),
        expires_at: Utc::now() + Duration::minutes(PAYMENT_QUOTE_MINUTES),
    }
}

/// Check the payment header and verify it on-chain
///
/// Returns the paying caller, or the response to send instead of the report.
async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    resource: &'static str,
    price: u64,
) -> Result<String, Response> {
    let txid = headers
        .get(PAYMENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let Some(txid) = txid else {
        info!("{} requested without payment", resource);
        let body = payment_required(resource, price, state.verifier.contract());
        return Err((StatusCode::PAYMENT_REQUIRED, Json(body)).into_response());
    };

    match state.verifier.verify(txid).await.into_caller() {
        Ok(caller) => Ok(caller),
        Err(AlphaError::Payment(details)) => {
            warn!("{} payment rejected: {}", resource, details);
            Err((
                StatusCode::FORBIDDEN,
                Json(VerificationFailed {
                    error: "Payment verification failed",
                    details,
                }),
            )
                .into_response())
        }
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()),
    }
}

/// Full alpha report
async fn full_report(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let caller = match authorize(&state, &headers, "/alpha", FULL_REPORT_PRICE).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    Json(state.alpha.full_report(&caller).await).into_response()
}

/// Quick snapshot with the top signals
async fn quick_report(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let caller = match authorize(&state, &headers, "/alpha/quick", QUICK_REPORT_PRICE).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    Json(state.alpha.quick_report(&caller).await).into_response()
}

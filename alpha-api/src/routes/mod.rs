//! API route definitions

mod alpha;
mod health;
mod landing;

use axum::Router;

use crate::AppState;

pub use alpha::PAYMENT_HEADER;

/// Create all routes
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(landing::routes())
        .merge(alpha::routes())
        .merge(health::routes())
}

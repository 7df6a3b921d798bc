//! HTTP adapter - the REST API.
//!
//! Each feature has its own router; [`api_router`] assembles them.

pub mod analytics;
pub mod billing;
pub mod error;
pub mod generation;
pub mod middleware;
pub mod state;
pub mod usage;
pub mod websites;

use axum::{routing::get, Router};

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Build the complete API router.
///
/// # Routes
///
/// - `POST /api/generate`
/// - `POST /api/stripe`, `POST /api/stripe/webhook`, `GET /api/tiers`
/// - `GET /api/usage`, `GET /api/usage/export/:format`
/// - `/api/websites/...`
/// - `/api/analytics/...`, `POST /api/forms/:website_id`
/// - `GET /health`
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(generation::generation_routes())
        .merge(billing::billing_routes())
        .merge(analytics::analytics_routes())
        .nest("/usage", usage::usage_routes())
        .nest("/websites", websites::website_routes());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

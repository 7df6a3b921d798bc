//! Routers for billing endpoints.

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{create_checkout, handle_payment_webhook, list_tiers};
use crate::adapters::http::state::AppState;

/// Mounted at `/api`.
///
/// Only the checkout route answers cross-origin requests; the webhook is
/// called server to server.
pub fn billing_routes() -> Router<AppState> {
    let checkout = Router::new()
        .route("/stripe", post(create_checkout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        );

    Router::new()
        .merge(checkout)
        .route("/stripe/webhook", post(handle_payment_webhook))
        .route("/tiers", get(list_tiers))
}

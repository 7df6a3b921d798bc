//! Router for generation endpoints.

use axum::{routing::post, Router};

use super::handlers::generate_website;
use crate::adapters::http::state::AppState;

/// Mounted at `/api`.
pub fn generation_routes() -> Router<AppState> {
    Router::new().route("/generate", post(generate_website))
}

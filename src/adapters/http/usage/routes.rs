//! Router for usage endpoints.

use axum::{routing::get, Router};

use super::handlers::{check_export, get_usage};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/usage`.
pub fn usage_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_usage))
        .route("/export/:format", get(check_export))
}

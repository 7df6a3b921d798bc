//! Router for analytics endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_stats, record_view, submit_form};
use crate::adapters::http::state::AppState;

/// Mounted at `/api`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/:website_id", get(get_stats))
        .route("/analytics/:website_id/views", post(record_view))
        .route("/forms/:website_id", post(submit_form))
}

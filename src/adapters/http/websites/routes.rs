//! Router for website endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_page, create_website, delete_website, export_website, get_website, list_websites,
    update_page,
};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/websites`. Every route requires a caller identity.
pub fn website_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_websites).post(create_website))
        .route("/:id", get(get_website).delete(delete_website))
        .route("/:id/pages", post(add_page))
        .route("/:id/pages/:index", put(update_page))
        .route("/:id/export/:format", get(export_website))
}

//! HTTP adapter for analytics.
//!
//! - `POST /api/analytics/:website_id/views` - count a page view (public)
//! - `POST /api/forms/:website_id` - store a form submission (public)
//! - `GET /api/analytics/:website_id` - owner statistics

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::analytics_routes;

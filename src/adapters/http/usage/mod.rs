//! HTTP adapter for usage and feature gating.
//!
//! - `GET /api/usage` - tier, reconciled counters, limits and permissions
//! - `GET /api/usage/export/:format` - whether the caller may export in a format

pub mod handlers;
pub mod routes;

pub use routes::usage_routes;

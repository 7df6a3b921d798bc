//! HTTP adapter for website generation.
//!
//! - `POST /api/generate` - turn a prompt into a complete HTML document

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::generation_routes;

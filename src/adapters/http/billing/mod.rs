//! HTTP adapter for subscription billing.
//!
//! - `POST /api/stripe` - start a subscription checkout (CORS: any origin)
//! - `POST /api/stripe/webhook` - payment provider events (signature verified)
//! - `GET /api/tiers` - the public tier table

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::billing_routes;

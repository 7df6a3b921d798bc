//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Anthropic Messages API client and a mock
//! - `stripe` - Stripe checkout and webhook verification, plus a mock
//! - `postgres` - sqlx repositories
//! - `memory` - in-memory repositories for tests and local runs
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;

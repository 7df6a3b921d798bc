//! HTTP middleware and extractors for axum.
//!
//! - `auth` - caller identity forwarded by the hosting auth layer

pub mod auth;

pub use auth::{AuthRejection, Caller, OptionalAuth, RequireAuth, USER_EMAIL_HEADER, USER_ID_HEADER};

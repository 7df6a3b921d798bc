//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports.

pub mod analytics;
pub mod billing;
pub mod generation;
pub mod usage;
pub mod websites;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `subscription` - Tiers, limits, usage counters and the feature gate
//! - `generation` - Prompt handling and HTML post-processing
//! - `website` - Website aggregate and export rendering
//! - `analytics` - View counters, form submissions and conversion stats

pub mod analytics;
pub mod foundation;
pub mod generation;
pub mod subscription;
pub mod website;

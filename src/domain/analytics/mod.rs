//! Analytics domain module.
//!
//! View counters and form submissions collected from published websites.

mod errors;
mod stats;

pub use errors::AnalyticsError;
pub use stats::{conversion_rate, AnalyticsStats, FormSubmission, PageAnalytics};

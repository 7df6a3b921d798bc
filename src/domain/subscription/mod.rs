//! Subscription domain module.
//!
//! Tier tables, usage counters and the pure feature-gate predicates.
//!
//! # Module Structure
//!
//! - `tier` - SubscriptionTier levels
//! - `limit` - Limit (numeric cap or unlimited)
//! - `export_format` - ExportFormat download targets
//! - `tier_limits` - Static limits per tier
//! - `usage` - UsageCounters and monthly reconciliation
//! - `feature_gate` - Predicates over tier + reconciled usage
//! - `profile` - Profile row owning tier and counters

mod errors;
mod export_format;
pub mod feature_gate;
mod limit;
mod profile;
mod tier;
mod tier_limits;
mod usage;

pub use errors::SubscriptionError;
pub use export_format::ExportFormat;
pub use feature_gate::{ExportPermission, Permissions};
pub use limit::Limit;
pub use profile::Profile;
pub use tier::SubscriptionTier;
pub use tier_limits::TierLimits;
pub use usage::{Reconciliation, ReconciledUsage, UsageCounters, UsageMonth};

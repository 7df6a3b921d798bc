//! Usage handlers.
//!
//! The server-side feature gate: usage snapshots, export checks and the
//! quota reservations other handlers take before doing counted work.

mod check_export;
mod get_usage;
mod quota;

pub use check_export::{CheckExportHandler, CheckExportQuery};
pub use get_usage::{GetUsageHandler, GetUsageQuery, UsageSnapshot};
pub use quota::{GenerationReservation, UsageQuota};

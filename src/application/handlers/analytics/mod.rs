//! Analytics handlers.
//!
//! View counting and form capture are public (called from published
//! sites); the stats query is owner-only and tier-gated.

mod get_stats;
mod record_view;
mod submit_form;

pub use get_stats::{GetStatsHandler, GetStatsQuery};
pub use record_view::{RecordViewCommand, RecordViewHandler};
pub use submit_form::{SubmitFormCommand, SubmitFormHandler};

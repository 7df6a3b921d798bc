//! Website domain module.
//!
//! Generated sites, their pages, and export rendering.

mod aggregate;
mod errors;
pub mod export;

pub use aggregate::{Page, Website, HOME_PATH, MAX_NAME_LENGTH};
pub use errors::WebsiteError;
pub use export::ExportedDocument;

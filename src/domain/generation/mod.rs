//! Generation domain module.
//!
//! Prompt handling and the sanitize/validate steps applied to model output.

mod errors;
pub mod html;
mod prompt;

pub use errors::GenerationError;
pub use html::{GeneratedHtml, DOCUMENT_MARKER};
pub use prompt::{
    Prompt, COMPRESSION_SYSTEM_PROMPT, COMPRESSION_THRESHOLD, GENERATION_SYSTEM_PROMPT,
};

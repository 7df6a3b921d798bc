//! Generation error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingPrompt | 400 |
//! | InvalidOutput | 400 |
//! | QuotaExceeded | 403 |
//! | Upstream | upstream status |
//! | NotConfigured | 500 |
//! | Provider | 500 |

use thiserror::Error;

use crate::domain::subscription::SubscriptionError;

/// Failures of the prompt → HTML pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Prompt is required")]
    MissingPrompt,

    /// The model replied, but not with an HTML document.
    #[error("Generated output is not a valid HTML document")]
    InvalidOutput { preview: String },

    /// The text-generation API answered with a non-2xx status.
    #[error("Text generation API returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("Generation is not configured: {0}")]
    NotConfigured(String),

    #[error("Generation failed: {0}")]
    Provider(String),

    #[error(transparent)]
    QuotaExceeded(#[from] SubscriptionError),
}

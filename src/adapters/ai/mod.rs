//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Messages API
//! - `MockAIProvider` - Configurable mock for testing

mod anthropic_provider;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, DEFAULT_MODEL};
pub use mock_provider::MockAIProvider;

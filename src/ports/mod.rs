//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## External Services
//!
//! - `AIProvider` - Hosted text-generation API
//! - `PaymentProvider` - Checkout sessions and webhook verification
//!
//! ## Repositories
//!
//! - `ProfileRepository` - Tier and usage counters per user
//! - `WebsiteRepository` - Generated websites
//! - `AnalyticsRepository` - View counters and form submissions

mod ai_provider;
mod analytics_repository;
mod payment_provider;
mod profile_repository;
mod website_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use analytics_repository::AnalyticsRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use profile_repository::ProfileRepository;
pub use website_repository::WebsiteRepository;

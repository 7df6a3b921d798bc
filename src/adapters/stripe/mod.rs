//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration:
//! - Subscription checkout sessions
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - All secrets are handled via `secrecy::SecretString`

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, MAX_TIMESTAMP_AGE_SECS};
pub use webhook_types::{
    hex_encode, SignatureHeader, SignatureParseError, StripeCheckoutSession, StripeSubscription,
    StripeWebhookEvent,
};

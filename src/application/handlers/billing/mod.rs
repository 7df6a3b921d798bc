//! Billing handlers.
//!
//! ## Commands
//! - Creating checkout sessions
//! - Applying payment webhooks to subscription tiers

mod create_checkout;
mod handle_webhook;
mod price_table;

pub use create_checkout::{
    CheckoutUrls, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use handle_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use price_table::PriceTable;

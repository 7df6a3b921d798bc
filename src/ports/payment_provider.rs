//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway (Stripe): opening hosted
//! checkout sessions and authenticating the webhook events that report their
//! outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a subscription checkout session.
    ///
    /// Exactly one session is created per call; there is no idempotency key.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns the parsed event if valid, error if signature invalid.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Internal user ID, echoed back as the client reference and in metadata.
    pub user_id: UserId,
    /// Customer email for pre-fill.
    pub email: String,
    /// Provider price to subscribe to.
    pub price_id: String,
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,
    /// Hosted payment page, when the provider returns one.
    pub url: Option<String>,
}

/// Webhook event from payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,
    pub event_type: WebhookEventType,
    pub data: WebhookEventData,
    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,
    /// Subscription deleted/ended.
    SubscriptionDeleted,
    /// Anything else; acknowledged and ignored.
    Unknown(String),
}

/// Webhook event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    #[serde(rename = "checkout")]
    Checkout {
        session_id: String,
        customer_id: Option<String>,
        /// From `metadata[user_id]`, falling back to `client_reference_id`.
        user_id: Option<String>,
        /// From `metadata[price_id]`.
        price_id: Option<String>,
    },
    #[serde(rename = "subscription")]
    Subscription {
        subscription_id: String,
        customer_id: String,
    },
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NotConfigured, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::NotConfigured => ErrorCode::ConfigurationError,
            PaymentErrorCode::InvalidWebhook | PaymentErrorCode::InvalidRequest => {
                ErrorCode::ValidationFailed
            }
            _ => ErrorCode::PaymentProviderError,
        };
        DomainError::new(code, err.message)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Secret key or webhook secret missing.
    NotConfigured,
    /// Provider rejected the request parameters.
    InvalidRequest,
    /// Provider rejected the API key.
    AuthenticationError,
    NetworkError,
    /// Any other provider failure.
    ProviderError,
    /// Webhook signature or payload invalid.
    InvalidWebhook,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NotConfigured => "not_configured",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_error_displays_code_and_message() {
        let err = PaymentError::invalid_webhook("bad signature");
        assert_eq!(err.to_string(), "invalid_webhook: bad signature");
    }

    #[test]
    fn not_configured_maps_to_configuration_error() {
        let err: DomainError = PaymentError::not_configured("STRIPE_SECRET_KEY unset").into();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
    }

    #[test]
    fn provider_failures_map_to_payment_provider_error() {
        let err: DomainError = PaymentError::network("timeout").into();
        assert_eq!(err.code, ErrorCode::PaymentProviderError);
    }
}

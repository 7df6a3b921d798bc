//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured checkout sessions and webhook events
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, WebhookEvent,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_webhook_event(event);
/// let result = mock.verify_webhook(b"{}", "t=1,v1=00").await;
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error returned by the next call of either method.
    next_error: Option<PaymentError>,

    /// Event returned by `verify_webhook`.
    next_webhook_event: Option<WebhookEvent>,

    /// Reject every webhook signature.
    reject_webhooks: bool,

    /// Every checkout request received.
    checkout_requests: Vec<CreateCheckoutRequest>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    /// Set the event returned on the next `verify_webhook` call.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Checkout requests received so far.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(err) = state.next_error.take() {
            return Err(err);
        }

        state.checkout_requests.push(request);
        let id = format!("cs_mock_{}", state.checkout_requests.len());
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
            id,
        })
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(err) = state.next_error.take() {
            return Err(err);
        }
        if state.reject_webhooks {
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        state
            .next_webhook_event
            .take()
            .ok_or_else(|| PaymentError::invalid_webhook("No webhook event configured"))
    }
}

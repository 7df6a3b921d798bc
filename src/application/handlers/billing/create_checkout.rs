//! CreateCheckoutHandler - Command handler for starting a subscription checkout.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{CreateCheckoutRequest, PaymentProvider};

/// Command to create a checkout session. Fields arrive unvalidated.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutCommand {
    pub price_id: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutResult {
    pub session_id: String,
    pub url: Option<String>,
}

/// Redirect targets handed to the payment provider.
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

pub struct CreateCheckoutHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    urls: CheckoutUrls,
}

impl CreateCheckoutHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, urls: CheckoutUrls) -> Self {
        Self {
            payment_provider,
            urls,
        }
    }

    pub async fn handle(&self, cmd: CreateCheckoutCommand) -> Result<CreateCheckoutResult, DomainError> {
        let price_id = required(cmd.price_id, "priceId")?;
        let user_id = UserId::new(required(cmd.user_id, "userId")?)
            .map_err(|e| DomainError::validation("userId", e.to_string()))?;
        let email = required(cmd.email, "email")?;

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: user_id.clone(),
                email,
                price_id: price_id.clone(),
                success_url: self.urls.success_url.clone(),
                cancel_url: self.urls.cancel_url.clone(),
            })
            .await
            .map_err(DomainError::from)?;

        tracing::info!(
            user_id = %user_id,
            price_id = %price_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(CreateCheckoutResult {
            session_id: session.id,
            url: session.url,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(DomainError::validation(
            field,
            "Missing required fields: priceId, userId, email",
        )),
    }
}

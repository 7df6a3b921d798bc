//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for the Stripe API: subscription
//! checkout sessions and webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! Both secrets are optional so the server can start without billing; calls
//! that need a missing secret fail with `NotConfigured`.
//!
//! ```ignore
//! let config = StripeConfig::new(Some(api_key), Some(webhook_secret));
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::Duration;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    SignatureHeader, StripeCheckoutSession, StripeErrorBody, StripeSubscription,
    StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
pub const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: Option<SecretString>,

    /// Webhook signing secret (whsec_...).
    webhook_secret: Option<SecretString>,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    timeout: Duration,
}

impl StripeConfig {
    pub fn new(api_key: Option<String>, webhook_secret: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()).map(SecretString::new),
            webhook_secret: webhook_secret
                .filter(|s| !s.trim().is_empty())
                .map(SecretString::new),
            api_base_url: "https://api.stripe.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// # Errors
    ///
    /// - `NetworkError` if the HTTP client cannot be built
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Verify webhook signature using HMAC-SHA256.
    fn verify_signature(
        &self,
        secret: &SecretString,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid signing secret: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| expected.as_slice().ct_eq(provided.as_slice()).into());

        if !matched {
            tracing::warn!("Invalid webhook signature");
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert to port types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        let event_type = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "customer.subscription.deleted" => WebhookEventType::SubscriptionDeleted,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = Self::extract_event_data(&stripe_event)?;

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }

    fn extract_event_data(event: &StripeWebhookEvent) -> Result<WebhookEventData, PaymentError> {
        match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;

                Ok(WebhookEventData::Checkout {
                    user_id: session.user_id(),
                    price_id: session.metadata.get("price_id").cloned(),
                    session_id: session.id,
                    customer_id: session.customer,
                })
            }

            s if s.starts_with("customer.subscription.") => {
                let sub: StripeSubscription = serde_json::from_value(event.data.object.clone())
                    .map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid subscription: {}", e))
                    })?;

                Ok(WebhookEventData::Subscription {
                    subscription_id: sub.id,
                    customer_id: sub.customer,
                })
            }

            _ => Ok(WebhookEventData::Raw {
                json: event.data.object.to_string(),
            }),
        }
    }

    /// Turn a non-2xx Stripe answer into a `PaymentError`.
    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<StripeErrorBody>(&text).ok().map(|b| b.error);
        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| format!("Stripe API error ({})", status));

        let code = match status.as_u16() {
            400 | 402 | 404 => PaymentErrorCode::InvalidRequest,
            401 | 403 => PaymentErrorCode::AuthenticationError,
            _ => PaymentErrorCode::ProviderError,
        };

        let mut err = PaymentError::new(code, message);
        if let Some(provider_code) = detail.and_then(|d| d.code.or(d.error_type)) {
            err = err.with_provider_code(provider_code);
        }
        err
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| PaymentError::not_configured("Stripe secret key is not configured"))?;

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let user_id = request.user_id.to_string();

        let params = [
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", request.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("customer_email", request.email),
            ("client_reference_id", user_id.clone()),
            ("metadata[user_id]", user_id),
            ("metadata[price_id]", request.price_id),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        tracing::info!(session_id = %session.id, "Stripe checkout session created");

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let secret = self
            .config
            .webhook_secret
            .as_ref()
            .ok_or_else(|| PaymentError::not_configured("Stripe webhook secret is not configured"))?;

        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        self.verify_signature(secret, payload, &header)?;

        let event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            "Webhook signature verified"
        );

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::webhook_types::hex_encode;
    use crate::domain::foundation::UserId;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET: &str = "whsec_test_secret";

    fn adapter() -> StripePaymentAdapter {
        StripePaymentAdapter::new(StripeConfig::new(
            Some("sk_test_key".to_string()),
            Some(SECRET.to_string()),
        ))
        .unwrap()
    }

    fn sign(secret: &str, timestamp: i64, payload: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, payload);
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes()))
    }

    fn checkout_request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            user_id: UserId::new("user-42").unwrap(),
            email: "a@example.com".to_string(),
            price_id: "price_pro".to_string(),
            success_url: "https://sento.app/success".to_string(),
            cancel_url: "https://sento.app/pricing".to_string(),
        }
    }

    fn checkout_completed_payload() -> String {
        json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "livemode": false,
            "data": {"object": {
                "id": "cs_1",
                "customer": "cus_1",
                "client_reference_id": "user-42",
                "metadata": {"user_id": "user-42", "price_id": "price_pro"}
            }}
        })
        .to_string()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn blank_secrets_count_as_missing() {
        let config = StripeConfig::new(Some("  ".to_string()), None);
        assert!(!config.has_api_key());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_accepts_valid_signature() {
        let payload = checkout_completed_payload();
        let signature = sign(SECRET, chrono::Utc::now().timestamp(), &payload);

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
        assert_eq!(
            event.data,
            WebhookEventData::Checkout {
                session_id: "cs_1".to_string(),
                customer_id: Some("cus_1".to_string()),
                user_id: Some("user-42".to_string()),
                price_id: Some("price_pro".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn verify_webhook_rejects_wrong_secret() {
        let payload = checkout_completed_payload();
        let signature = sign("whsec_other", chrono::Utc::now().timestamp(), &payload);

        let err = adapter()
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_tampered_payload() {
        let payload = checkout_completed_payload();
        let signature = sign(SECRET, chrono::Utc::now().timestamp(), &payload);
        let tampered = payload.replace("price_pro", "price_business");

        let result = adapter().verify_webhook(tampered.as_bytes(), &signature).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn verify_webhook_rejects_expired_timestamp() {
        let payload = checkout_completed_payload();
        let old = chrono::Utc::now().timestamp() - MAX_TIMESTAMP_AGE_SECS - 10;
        let signature = sign(SECRET, old, &payload);

        let err = adapter()
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap_err();
        assert!(err.message.contains("too old"));
    }

    #[tokio::test]
    async fn verify_webhook_rejects_malformed_header() {
        let err = adapter()
            .verify_webhook(b"{}", "garbage")
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_without_secret_is_not_configured() {
        let adapter =
            StripePaymentAdapter::new(StripeConfig::new(Some("sk".to_string()), None)).unwrap();
        let err = adapter.verify_webhook(b"{}", "t=1,v1=00").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NotConfigured);
    }

    #[tokio::test]
    async fn subscription_deleted_is_parsed() {
        let payload = json!({
            "id": "evt_2",
            "type": "customer.subscription.deleted",
            "created": 1704067200,
            "data": {"object": {"id": "sub_1", "customer": "cus_1", "status": "canceled"}}
        })
        .to_string();
        let signature = sign(SECRET, chrono::Utc::now().timestamp(), &payload);

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::SubscriptionDeleted);
        assert_eq!(
            event.data,
            WebhookEventData::Subscription {
                subscription_id: "sub_1".to_string(),
                customer_id: "cus_1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unknown_events_are_passed_as_raw() {
        let payload = json!({
            "id": "evt_3",
            "type": "invoice.paid",
            "created": 1704067200,
            "data": {"object": {"id": "in_1"}}
        })
        .to_string();
        let signature = sign(SECRET, chrono::Utc::now().timestamp(), &payload);

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap();

        assert_eq!(
            event.event_type,
            WebhookEventType::Unknown("invoice.paid".to_string())
        );
        assert!(matches!(event.data, WebhookEventData::Raw { .. }));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn checkout_posts_form_and_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Basic c2tfdGVzdF9rZXk6"))
            .and(body_string_contains("mode=subscription"))
            .and(body_string_contains("client_reference_id=user-42"))
            .and(body_string_contains("metadata%5Buser_id%5D=user-42"))
            .and(body_string_contains("metadata%5Bprice_id%5D=price_pro"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = StripePaymentAdapter::new(
            StripeConfig::new(Some("sk_test_key".to_string()), None).with_base_url(server.uri()),
        )
        .unwrap();

        let session = adapter
            .create_checkout_session(checkout_request())
            .await
            .unwrap();

        assert_eq!(session.id, "cs_test_123");
        assert!(session.url.is_some());
    }

    #[tokio::test]
    async fn checkout_error_carries_stripe_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "code": "resource_missing",
                    "message": "No such price: 'price_pro'"
                }
            })))
            .mount(&server)
            .await;

        let adapter = StripePaymentAdapter::new(
            StripeConfig::new(Some("sk_test_key".to_string()), None).with_base_url(server.uri()),
        )
        .unwrap();

        let err = adapter
            .create_checkout_session(checkout_request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.message, "No such price: 'price_pro'");
        assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
    }

    #[tokio::test]
    async fn checkout_without_key_is_not_configured() {
        let adapter = StripePaymentAdapter::new(StripeConfig::new(None, None)).unwrap();
        let err = adapter
            .create_checkout_session(checkout_request())
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NotConfigured);
    }
}

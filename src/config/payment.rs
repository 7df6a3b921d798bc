//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::billing::{CheckoutUrls, PriceTable};
use crate::domain::subscription::SubscriptionTier;

/// Stripe settings, the price table and checkout redirect targets.
///
/// Keys are optional at startup; checkout and webhook requests fail with a
/// configuration error while they are unset.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub stripe_secret_key: Option<String>,

    pub stripe_webhook_secret: Option<String>,

    /// Override for the Stripe API origin (tests, proxies)
    pub stripe_base_url: Option<String>,

    pub basic_price_id: Option<String>,
    pub pro_price_id: Option<String>,
    pub business_price_id: Option<String>,

    #[serde(default = "default_success_url")]
    pub success_url: String,

    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key
            .as_deref()
            .is_some_and(|k| k.starts_with("sk_test_"))
    }

    /// Price id → tier lookup for webhooks.
    pub fn price_table(&self) -> PriceTable {
        let entries = [
            (&self.basic_price_id, SubscriptionTier::Basic),
            (&self.pro_price_id, SubscriptionTier::Pro),
            (&self.business_price_id, SubscriptionTier::Business),
        ];
        entries
            .into_iter()
            .fold(PriceTable::new(), |table, (price, tier)| match price {
                Some(price) => table.with_price(price.clone(), tier),
                None => table,
            })
    }

    pub fn checkout_urls(&self) -> CheckoutUrls {
        CheckoutUrls {
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = non_blank(&self.stripe_secret_key) {
            if !key.starts_with("sk_") && !key.starts_with("rk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = non_blank(&self.stripe_webhook_secret) {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        if !is_http_url(&self.success_url) {
            return Err(ValidationError::InvalidRedirectUrl("success_url"));
        }
        if !is_http_url(&self.cancel_url) {
            return Err(ValidationError::InvalidRedirectUrl("cancel_url"));
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            stripe_base_url: None,
            basic_price_id: None,
            pro_price_id: None,
            business_price_id: None,
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_success_url() -> String {
    "http://localhost:5173/dashboard?checkout=success".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:5173/pricing".to_string()
}

//! HandlePaymentWebhookHandler - Applies payment confirmations to user tiers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{SubscriptionTier, UsageMonth};
use crate::ports::{
    PaymentProvider, ProfileRepository, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::PriceTable;

#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: String,
}

/// What the event changed, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    TierChanged {
        user_id: UserId,
        tier: SubscriptionTier,
    },
    Downgraded {
        user_id: UserId,
    },
    /// Verified but not actionable.
    Ignored,
}

pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    profiles: Arc<dyn ProfileRepository>,
    prices: PriceTable,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        profiles: Arc<dyn ProfileRepository>,
        prices: PriceTable,
    ) -> Self {
        Self {
            payment_provider,
            profiles,
            prices,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, DomainError> {
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook verification failed");
                DomainError::from(e)
            })?;

        tracing::info!(event_id = %event.id, event_type = ?event.event_type, "Webhook received");

        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => self.checkout_completed(event).await,
            WebhookEventType::SubscriptionDeleted => self.subscription_deleted(event).await,
            WebhookEventType::Unknown(_) => Ok(HandlePaymentWebhookResult::Ignored),
        }
    }

    async fn checkout_completed(
        &self,
        event: WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, DomainError> {
        let WebhookEventData::Checkout {
            session_id,
            customer_id,
            user_id,
            price_id,
        } = event.data
        else {
            tracing::warn!(event_id = %event.id, "Checkout event without session data");
            return Ok(HandlePaymentWebhookResult::Ignored);
        };

        let Some(user_id) = user_id.and_then(|id| UserId::new(id).ok()) else {
            tracing::warn!(session_id = %session_id, "Checkout session has no user reference");
            return Ok(HandlePaymentWebhookResult::Ignored);
        };

        let Some(tier) = price_id.as_deref().and_then(|p| self.prices.tier_for(p)) else {
            tracing::warn!(
                session_id = %session_id,
                price_id = ?price_id,
                "Checkout price is not in the configured price table"
            );
            return Ok(HandlePaymentWebhookResult::Ignored);
        };

        self.profiles
            .find_or_create(&user_id, None, UsageMonth::current())
            .await?;
        self.profiles
            .update_tier(&user_id, tier, customer_id.as_deref())
            .await?;

        tracing::info!(user_id = %user_id, tier = %tier, "Subscription tier updated");
        Ok(HandlePaymentWebhookResult::TierChanged { user_id, tier })
    }

    async fn subscription_deleted(
        &self,
        event: WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, DomainError> {
        let WebhookEventData::Subscription { customer_id, .. } = event.data else {
            return Ok(HandlePaymentWebhookResult::Ignored);
        };

        let Some(profile) = self.profiles.find_by_stripe_customer(&customer_id).await? else {
            tracing::warn!(customer_id = %customer_id, "No profile for cancelled subscription");
            return Ok(HandlePaymentWebhookResult::Ignored);
        };

        self.profiles
            .update_tier(&profile.user_id, SubscriptionTier::Free, None)
            .await?;

        tracing::info!(user_id = %profile.user_id, "Subscription ended, downgraded to free");
        Ok(HandlePaymentWebhookResult::Downgraded {
            user_id: profile.user_id,
        })
    }
}

//! UsageQuota - Atomic reservation of counted resources.
//!
//! Reconcile, check and increment happen in one repository call, so two
//! concurrent requests cannot both take the last unit of a quota.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{
    SubscriptionError, SubscriptionTier, TierLimits, UsageCounters, UsageMonth,
};
use crate::ports::ProfileRepository;

/// A generation taken from a user's monthly quota.
///
/// Hand it back to [`UsageQuota::release_generation`] if the work it paid
/// for failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReservation {
    pub user_id: UserId,
    pub month: UsageMonth,
    pub tier: SubscriptionTier,
    pub counters: UsageCounters,
}

/// Reserve/release operations over the profile store.
#[derive(Clone)]
pub struct UsageQuota {
    profiles: Arc<dyn ProfileRepository>,
}

impl UsageQuota {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Take one generation for the current month.
    pub async fn reserve_generation(
        &self,
        user_id: &UserId,
    ) -> Result<GenerationReservation, SubscriptionError> {
        self.reserve_generation_in(user_id, UsageMonth::current()).await
    }

    pub(crate) async fn reserve_generation_in(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<GenerationReservation, SubscriptionError> {
        let profile = self.profiles.find_or_create(user_id, None, month).await?;
        let limit = TierLimits::for_tier(profile.tier).monthly_generations;

        match self
            .profiles
            .try_reserve_generation(user_id, month, limit)
            .await?
        {
            Some(counters) => {
                tracing::debug!(
                    user_id = %user_id,
                    used = counters.generations_this_month,
                    limit = %limit,
                    "Generation reserved"
                );
                Ok(GenerationReservation {
                    user_id: user_id.clone(),
                    month,
                    tier: profile.tier,
                    counters,
                })
            }
            None => {
                tracing::info!(user_id = %user_id, tier = %profile.tier, "Monthly generation limit reached");
                Err(SubscriptionError::limit_reached(
                    "monthly generation",
                    limit,
                    profile.tier,
                ))
            }
        }
    }

    /// Give a reserved generation back.
    pub async fn release_generation(
        &self,
        reservation: &GenerationReservation,
    ) -> Result<(), SubscriptionError> {
        self.profiles
            .release_generation(&reservation.user_id, reservation.month)
            .await?;
        tracing::debug!(user_id = %reservation.user_id, "Generation released");
        Ok(())
    }

    /// Take one project slot. Returns the tier the check ran against.
    pub async fn reserve_project(
        &self,
        user_id: &UserId,
    ) -> Result<SubscriptionTier, SubscriptionError> {
        let profile = self
            .profiles
            .find_or_create(user_id, None, UsageMonth::current())
            .await?;
        let limit = TierLimits::for_tier(profile.tier).max_projects;

        match self.profiles.try_reserve_project(user_id, limit).await? {
            Some(_) => Ok(profile.tier),
            None => Err(SubscriptionError::limit_reached(
                "project",
                limit,
                profile.tier,
            )),
        }
    }

    pub async fn release_project(&self, user_id: &UserId) -> Result<(), SubscriptionError> {
        self.profiles.release_project(user_id).await?;
        Ok(())
    }

    /// Current tier, creating a free profile on first sight.
    pub async fn tier_of(&self, user_id: &UserId) -> Result<SubscriptionTier, SubscriptionError> {
        Ok(self
            .profiles
            .find_or_create(user_id, None, UsageMonth::current())
            .await?
            .tier)
    }
}

//! GetUsageHandler - Query handler for a user's tier, usage and permissions.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{
    Permissions, ReconciledUsage, SubscriptionError, SubscriptionTier, TierLimits, UsageMonth,
};
use crate::ports::ProfileRepository;

/// Query for the caller's usage snapshot.
#[derive(Debug, Clone)]
pub struct GetUsageQuery {
    pub user_id: UserId,
    /// Recorded on first sight of the user.
    pub email: Option<String>,
}

/// Tier, counters reconciled to the current month, limits and permissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub tier: SubscriptionTier,
    pub usage: ReconciledUsage,
    pub limits: TierLimits,
    pub permissions: Permissions,
}

/// Handler for reading usage.
///
/// Loads or lazily creates the profile, reconciles its counters, and
/// persists a monthly reset when one was due.
pub struct GetUsageHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetUsageHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: GetUsageQuery) -> Result<UsageSnapshot, SubscriptionError> {
        self.handle_in_month(query, UsageMonth::current()).await
    }

    pub(crate) async fn handle_in_month(
        &self,
        query: GetUsageQuery,
        month: UsageMonth,
    ) -> Result<UsageSnapshot, SubscriptionError> {
        let profile = self
            .profiles
            .find_or_create(&query.user_id, query.email.as_deref(), month)
            .await?;

        let mut reconciliation = profile.reconcile(month);
        if reconciliation.was_reset {
            // The stored counters may have moved since the read; report them.
            let counters = self
                .profiles
                .reset_monthly_usage(&query.user_id, month)
                .await?;
            reconciliation.usage = counters.reconcile(month).usage;
            tracing::info!(user_id = %query.user_id, month = %month, "Persisted monthly usage reset");
        }

        let usage = reconciliation.usage;
        Ok(UsageSnapshot {
            tier: profile.tier,
            usage,
            limits: TierLimits::for_tier(profile.tier),
            permissions: Permissions::evaluate(profile.tier, &usage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::DomainError;
    use crate::domain::subscription::{Limit, Profile, UsageCounters};
    use async_trait::async_trait;

    /// Lets a generation land between the reset and the read-back, the way a
    /// concurrent reserve would.
    struct RacingReserve {
        inner: InMemoryProfileRepository,
    }

    #[async_trait]
    impl ProfileRepository for RacingReserve {
        async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            self.inner.find(user_id).await
        }

        async fn find_or_create(
            &self,
            user_id: &UserId,
            email: Option<&str>,
            month: UsageMonth,
        ) -> Result<Profile, DomainError> {
            self.inner.find_or_create(user_id, email, month).await
        }

        async fn reset_monthly_usage(
            &self,
            user_id: &UserId,
            month: UsageMonth,
        ) -> Result<UsageCounters, DomainError> {
            self.inner.reset_monthly_usage(user_id, month).await?;
            self.inner
                .try_reserve_generation(user_id, month, Limit::Unlimited)
                .await?;
            self.inner.reset_monthly_usage(user_id, month).await
        }

        async fn try_reserve_generation(
            &self,
            user_id: &UserId,
            month: UsageMonth,
            limit: Limit,
        ) -> Result<Option<UsageCounters>, DomainError> {
            self.inner.try_reserve_generation(user_id, month, limit).await
        }

        async fn release_generation(
            &self,
            user_id: &UserId,
            month: UsageMonth,
        ) -> Result<(), DomainError> {
            self.inner.release_generation(user_id, month).await
        }

        async fn try_reserve_project(
            &self,
            user_id: &UserId,
            limit: Limit,
        ) -> Result<Option<UsageCounters>, DomainError> {
            self.inner.try_reserve_project(user_id, limit).await
        }

        async fn release_project(&self, user_id: &UserId) -> Result<(), DomainError> {
            self.inner.release_project(user_id).await
        }

        async fn update_tier(
            &self,
            user_id: &UserId,
            tier: SubscriptionTier,
            stripe_customer_id: Option<&str>,
        ) -> Result<(), DomainError> {
            self.inner.update_tier(user_id, tier, stripe_customer_id).await
        }

        async fn find_by_stripe_customer(
            &self,
            customer_id: &str,
        ) -> Result<Option<Profile>, DomainError> {
            self.inner.find_by_stripe_customer(customer_id).await
        }
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn month(m: u32) -> UsageMonth {
        UsageMonth::new(2024, m).unwrap()
    }

    fn query() -> GetUsageQuery {
        GetUsageQuery {
            user_id: user(),
            email: Some("a@b.c".to_string()),
        }
    }

    #[tokio::test]
    async fn first_read_creates_free_profile() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let handler = GetUsageHandler::new(repo.clone());

        let snapshot = handler.handle_in_month(query(), month(5)).await.unwrap();

        assert_eq!(snapshot.tier, SubscriptionTier::Free);
        assert_eq!(snapshot.usage.generations_this_month(), 0);
        assert!(snapshot.permissions.can_generate);
        assert_eq!(snapshot.permissions.remaining_generations, Limit::Limited(3));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn stale_month_is_reset_and_persisted() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let mut profile = Profile::new_free(user(), None, month(4));
        profile.usage = UsageCounters {
            generations_this_month: 3,
            project_count: 1,
            last_reset_month: month(4),
        };
        repo.insert(profile);
        let handler = GetUsageHandler::new(repo.clone());

        let snapshot = handler.handle_in_month(query(), month(5)).await.unwrap();
        assert_eq!(snapshot.usage.generations_this_month(), 0);
        assert_eq!(snapshot.usage.project_count(), 1);
        assert!(snapshot.permissions.can_generate);

        let stored = repo.find(&user()).await.unwrap().unwrap();
        assert_eq!(stored.usage.generations_this_month, 0);
        assert_eq!(stored.usage.last_reset_month, month(5));
    }

    #[tokio::test]
    async fn exhausted_free_user_cannot_generate() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let mut profile = Profile::new_free(user(), None, month(5));
        profile.usage.generations_this_month = 3;
        repo.insert(profile);
        let handler = GetUsageHandler::new(repo);

        let snapshot = handler.handle_in_month(query(), month(5)).await.unwrap();
        assert!(!snapshot.permissions.can_generate);
        assert_eq!(snapshot.permissions.remaining_generations, Limit::Limited(0));
    }

    #[tokio::test]
    async fn reset_reports_counters_returned_by_the_store() {
        let inner = InMemoryProfileRepository::new();
        let mut profile = Profile::new_free(user(), None, month(4));
        profile.usage.generations_this_month = 3;
        inner.insert(profile);
        let handler = GetUsageHandler::new(Arc::new(RacingReserve { inner }));

        let snapshot = handler.handle_in_month(query(), month(5)).await.unwrap();

        assert_eq!(snapshot.usage.generations_this_month(), 1);
        assert_eq!(snapshot.usage.month(), month(5));
        assert_eq!(snapshot.permissions.remaining_generations, Limit::Limited(2));
    }
}

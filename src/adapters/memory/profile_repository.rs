//! In-memory implementation of ProfileRepository.
//!
//! Mirrors the conditional semantics of the Postgres adapter under a single
//! mutex, so reservations are atomic within one process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Limit, Profile, SubscriptionTier, UsageCounters, UsageMonth};
use crate::ports::ProfileRepository;

/// Profiles keyed by user id. Does not persist across restarts.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a profile directly.
    pub fn insert(&self, profile: Profile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn profile_not_found(user_id: &UserId) -> DomainError {
    DomainError::new(
        ErrorCode::ProfileNotFound,
        format!("Profile not found: {}", user_id),
    )
}

/// Applies the month rollover in place.
fn roll_month(profile: &mut Profile, month: UsageMonth) {
    if profile.usage.is_stale(month) {
        profile.usage.generations_this_month = 0;
        profile.usage.last_reset_month = month;
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn find_or_create(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        month: UsageMonth,
    ) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.entry(user_id.clone()).or_insert_with(|| {
            Profile::new_free(user_id.clone(), email.map(str::to_string), month)
        });
        if profile.email.is_none() {
            profile.email = email.map(str::to_string);
        }
        Ok(profile.clone())
    }

    async fn reset_monthly_usage(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<UsageCounters, DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| profile_not_found(user_id))?;

        if profile.usage.is_stale(month) {
            roll_month(profile, month);
            profile.updated_at = Timestamp::now();
        }
        Ok(profile.usage)
    }

    async fn try_reserve_generation(
        &self,
        user_id: &UserId,
        month: UsageMonth,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(user_id) else {
            return Ok(None);
        };

        let used = profile.reconcile(month).usage.generations_this_month();
        if limit.is_reached(used) {
            return Ok(None);
        }

        roll_month(profile, month);
        profile.usage.generations_this_month += 1;
        profile.updated_at = Timestamp::now();
        Ok(Some(profile.usage))
    }

    async fn release_generation(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.get_mut(user_id) {
            if profile.usage.last_reset_month == month && profile.usage.generations_this_month > 0 {
                profile.usage.generations_this_month -= 1;
                profile.updated_at = Timestamp::now();
            }
        }
        Ok(())
    }

    async fn try_reserve_project(
        &self,
        user_id: &UserId,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(user_id) else {
            return Ok(None);
        };

        if limit.is_reached(profile.usage.project_count) {
            return Ok(None);
        }

        profile.usage.project_count += 1;
        profile.updated_at = Timestamp::now();
        Ok(Some(profile.usage))
    }

    async fn release_project(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.get_mut(user_id) {
            profile.usage.project_count = profile.usage.project_count.saturating_sub(1);
            profile.updated_at = Timestamp::now();
        }
        Ok(())
    }

    async fn update_tier(
        &self,
        user_id: &UserId,
        tier: SubscriptionTier,
        stripe_customer_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| profile_not_found(user_id))?;

        profile.tier = tier;
        if let Some(customer) = stripe_customer_id {
            profile.stripe_customer_id = Some(customer.to_string());
        }
        profile.updated_at = Timestamp::now();
        Ok(())
    }

    async fn find_by_stripe_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .find(|p| p.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn month(m: u32) -> UsageMonth {
        UsageMonth::new(2024, m).unwrap()
    }

    #[tokio::test]
    async fn find_or_create_is_idempotent_and_fills_email() {
        let repo = InMemoryProfileRepository::new();
        let first = repo.find_or_create(&user(), None, month(3)).await.unwrap();
        assert!(first.email.is_none());

        let second = repo
            .find_or_create(&user(), Some("a@b.c"), month(3))
            .await
            .unwrap();
        assert_eq!(second.email.as_deref(), Some("a@b.c"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn reserve_stops_at_limit() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();

        let limit = Limit::Limited(2);
        assert!(repo.try_reserve_generation(&user(), month(3), limit).await.unwrap().is_some());
        assert!(repo.try_reserve_generation(&user(), month(3), limit).await.unwrap().is_some());
        assert!(repo.try_reserve_generation(&user(), month(3), limit).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reserve_in_new_month_starts_from_zero() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();
        let limit = Limit::Limited(1);
        repo.try_reserve_generation(&user(), month(3), limit).await.unwrap();

        let counters = repo
            .try_reserve_generation(&user(), month(4), limit)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(counters.generations_this_month, 1);
        assert_eq!(counters.last_reset_month, month(4));
    }

    #[tokio::test]
    async fn unlimited_never_refuses() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();
        for _ in 0..50 {
            assert!(repo
                .try_reserve_generation(&user(), month(3), Limit::Unlimited)
                .await
                .unwrap()
                .is_some());
        }
    }

    #[tokio::test]
    async fn release_never_goes_below_zero() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();
        repo.release_generation(&user(), month(3)).await.unwrap();
        repo.release_project(&user()).await.unwrap();

        let profile = repo.find(&user()).await.unwrap().unwrap();
        assert_eq!(profile.usage.generations_this_month, 0);
        assert_eq!(profile.usage.project_count, 0);
    }

    #[tokio::test]
    async fn reset_keeps_project_count() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();
        repo.try_reserve_generation(&user(), month(3), Limit::Unlimited).await.unwrap();
        repo.try_reserve_project(&user(), Limit::Limited(3)).await.unwrap();

        let counters = repo.reset_monthly_usage(&user(), month(4)).await.unwrap();
        assert_eq!(counters.generations_this_month, 0);
        assert_eq!(counters.project_count, 1);
        assert_eq!(counters.last_reset_month, month(4));
    }

    #[tokio::test]
    async fn update_tier_records_customer_and_is_searchable() {
        let repo = InMemoryProfileRepository::new();
        repo.find_or_create(&user(), None, month(3)).await.unwrap();
        repo.update_tier(&user(), SubscriptionTier::Pro, Some("cus_1"))
            .await
            .unwrap();

        let found = repo.find_by_stripe_customer("cus_1").await.unwrap().unwrap();
        assert_eq!(found.tier, SubscriptionTier::Pro);

        // A later downgrade without a customer keeps the stored one.
        repo.update_tier(&user(), SubscriptionTier::Free, None).await.unwrap();
        let found = repo.find(&user()).await.unwrap().unwrap();
        assert_eq!(found.stripe_customer_id.as_deref(), Some("cus_1"));
    }

    #[tokio::test]
    async fn update_tier_for_unknown_user_is_not_found() {
        let repo = InMemoryProfileRepository::new();
        let err = repo
            .update_tier(&user(), SubscriptionTier::Basic, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}

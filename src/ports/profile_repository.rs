//! Profile repository port.
//!
//! Persists the per-user subscription state: tier, payment customer and the
//! usage counters the feature gate reads.
//!
//! # Atomicity
//!
//! Counter changes are conditional single-statement updates. A reserve call
//! reconciles the month, checks the limit and increments in one step, so two
//! concurrent requests can never both take the last unit of a quota.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{Limit, Profile, SubscriptionTier, UsageCounters, UsageMonth};

/// Repository port for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by user.
    ///
    /// Returns `None` if the user has never been seen.
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Load the profile, creating a free-tier one stamped with `month` if absent.
    async fn find_or_create(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        month: UsageMonth,
    ) -> Result<Profile, DomainError>;

    /// Zero the monthly counters unless they are already stamped with `month`.
    ///
    /// Returns the counters after the call. Running it twice in the same
    /// month is a no-op the second time.
    async fn reset_monthly_usage(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<UsageCounters, DomainError>;

    /// Reconcile with `month` and take one generation if `limit` allows it.
    ///
    /// Returns the updated counters, or `None` when the limit is reached.
    async fn try_reserve_generation(
        &self,
        user_id: &UserId,
        month: UsageMonth,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError>;

    /// Give back a generation taken in `month`. Never drops below zero and
    /// ignores reservations from a month that has since been reset.
    async fn release_generation(&self, user_id: &UserId, month: UsageMonth)
        -> Result<(), DomainError>;

    /// Take one project slot if `limit` allows it.
    ///
    /// Returns the updated counters, or `None` when the limit is reached.
    async fn try_reserve_project(
        &self,
        user_id: &UserId,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError>;

    /// Free a project slot. Never drops below zero.
    async fn release_project(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Set the tier, recording the payment customer when given.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the user has no profile
    async fn update_tier(
        &self,
        user_id: &UserId,
        tier: SubscriptionTier,
        stripe_customer_id: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Find the profile linked to a payment customer.
    async fn find_by_stripe_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Profile>, DomainError>;
}

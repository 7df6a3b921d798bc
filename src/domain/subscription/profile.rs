//! User profile row: tier plus usage counters.

use serde::{Deserialize, Serialize};

use super::{Reconciliation, SubscriptionTier, UsageCounters, UsageMonth};
use crate::domain::foundation::{Timestamp, UserId};

/// A user's subscription state as held in the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub tier: SubscriptionTier,
    pub usage: UsageCounters,
    /// Payment-provider customer, set once a checkout completes.
    pub stripe_customer_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// A new free-tier profile with zeroed counters.
    pub fn new_free(user_id: UserId, email: Option<String>, month: UsageMonth) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            email,
            tier: SubscriptionTier::Free,
            usage: UsageCounters::fresh(month),
            stripe_customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconcile the stored counters with `current`.
    pub fn reconcile(&self, current: UsageMonth) -> Reconciliation {
        self.usage.reconcile(current)
    }
}

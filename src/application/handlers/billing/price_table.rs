//! Mapping from payment-provider price ids to subscription tiers.

use std::collections::HashMap;

use crate::domain::subscription::SubscriptionTier;

/// Configured price ids, one or more per paid tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<String, SubscriptionTier>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a price; blank ids are skipped.
    pub fn with_price(mut self, price_id: impl Into<String>, tier: SubscriptionTier) -> Self {
        let price_id = price_id.into();
        if !price_id.trim().is_empty() {
            self.prices.insert(price_id, tier);
        }
        self
    }

    pub fn tier_for(&self, price_id: &str) -> Option<SubscriptionTier> {
        self.prices.get(price_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

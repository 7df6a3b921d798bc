//! GetStatsHandler - Owner-only analytics summary.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::analytics::{AnalyticsError, AnalyticsStats};
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::subscription::{feature_gate, SubscriptionError, SubscriptionTier};
use crate::ports::{AnalyticsRepository, WebsiteRepository};

#[derive(Debug, Clone)]
pub struct GetStatsQuery {
    pub user_id: UserId,
    pub website_id: WebsiteId,
}

pub struct GetStatsHandler {
    websites: Arc<dyn WebsiteRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    quota: UsageQuota,
}

impl GetStatsHandler {
    pub fn new(
        websites: Arc<dyn WebsiteRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        quota: UsageQuota,
    ) -> Self {
        Self {
            websites,
            analytics,
            quota,
        }
    }

    pub async fn handle(&self, query: GetStatsQuery) -> Result<AnalyticsStats, AnalyticsError> {
        let website = self
            .websites
            .find_by_id(&query.website_id)
            .await?
            .ok_or(AnalyticsError::WebsiteNotFound(query.website_id))?;
        if !website.is_owner(&query.user_id) {
            return Err(AnalyticsError::Forbidden);
        }

        let tier = self.quota.tier_of(&query.user_id).await?;
        if !feature_gate::can_view_analytics(tier) {
            let required = SubscriptionTier::ALL
                .into_iter()
                .find(|t| feature_gate::can_view_analytics(*t));
            return Err(SubscriptionError::feature_not_included("analytics", tier, required).into());
        }

        let counters = self.analytics.find_counters(&query.website_id).await?;
        let submissions = self.analytics.count_submissions(&query.website_id).await?;
        Ok(AnalyticsStats::from_counts(counters, submissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::websites::test_support::{Stores, PAGE};
    use crate::domain::analytics::FormSubmission;
    use crate::domain::website::Website;
    use serde_json::json;

    async fn setup(tier: SubscriptionTier) -> (Stores, UserId, WebsiteId) {
        let stores = Stores::new();
        let user = stores.user_on("owner", tier).await;
        let website = Website::new(
            WebsiteId::new(),
            user.clone(),
            "Site".to_string(),
            "p".to_string(),
            PAGE.to_string(),
        )
        .unwrap();
        stores.websites.save(&website).await.unwrap();
        (stores, user, *website.id())
    }

    fn handler(stores: &Stores) -> GetStatsHandler {
        GetStatsHandler::new(stores.websites.clone(), stores.analytics.clone(), stores.quota())
    }

    #[tokio::test]
    async fn stats_combine_counters_and_submissions() {
        let (stores, user, id) = setup(SubscriptionTier::Basic).await;
        for visitor in [true, true, true, true, false] {
            stores.analytics.record_view(&id, visitor).await.unwrap();
        }
        let submission = FormSubmission::new(id, json!({"name": "Ada"})).unwrap();
        stores.analytics.save_submission(&submission).await.unwrap();

        let stats = handler(&stores)
            .handle(GetStatsQuery { user_id: user, website_id: id })
            .await
            .unwrap();

        assert_eq!(stats.views, 5);
        assert_eq!(stats.unique_visitors, 4);
        assert_eq!(stats.submissions, 1);
        assert_eq!(stats.conversion_rate, 25.0);
    }

    #[tokio::test]
    async fn no_visitors_means_zero_conversion() {
        let (stores, user, id) = setup(SubscriptionTier::Pro).await;
        let stats = handler(&stores)
            .handle(GetStatsQuery { user_id: user, website_id: id })
            .await
            .unwrap();
        assert_eq!(stats.conversion_rate, 0.0);
    }

    #[tokio::test]
    async fn free_tier_cannot_view_analytics() {
        let (stores, user, id) = setup(SubscriptionTier::Free).await;
        let err = handler(&stores)
            .handle(GetStatsQuery { user_id: user, website_id: id })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::Subscription(SubscriptionError::feature_not_included(
                "analytics",
                SubscriptionTier::Free,
                Some(SubscriptionTier::Basic)
            ))
        );
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let (stores, _, id) = setup(SubscriptionTier::Pro).await;
        let err = handler(&stores)
            .handle(GetStatsQuery {
                user_id: UserId::new("someone-else").unwrap(),
                website_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, AnalyticsError::Forbidden);
    }
}

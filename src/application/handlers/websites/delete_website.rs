//! DeleteWebsiteHandler - Removes a website, its analytics and its project slot.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::WebsiteError;
use crate::ports::{AnalyticsRepository, WebsiteRepository};

use super::load_owned;

#[derive(Debug, Clone)]
pub struct DeleteWebsiteCommand {
    pub user_id: UserId,
    pub website_id: WebsiteId,
}

pub struct DeleteWebsiteHandler {
    repository: Arc<dyn WebsiteRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    quota: UsageQuota,
}

impl DeleteWebsiteHandler {
    pub fn new(
        repository: Arc<dyn WebsiteRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        quota: UsageQuota,
    ) -> Self {
        Self {
            repository,
            analytics,
            quota,
        }
    }

    pub async fn handle(&self, cmd: DeleteWebsiteCommand) -> Result<(), WebsiteError> {
        load_owned(self.repository.as_ref(), &cmd.website_id, &cmd.user_id).await?;

        self.analytics.delete_for_website(&cmd.website_id).await?;
        self.repository.delete(&cmd.website_id).await?;
        self.quota.release_project(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, website_id = %cmd.website_id, "Website deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::websites::test_support::{Stores, PAGE};
    use crate::application::handlers::websites::{CreateWebsiteCommand, CreateWebsiteHandler};
    use crate::domain::subscription::SubscriptionTier;
    use crate::ports::ProfileRepository;

    #[tokio::test]
    async fn delete_frees_the_project_slot() {
        let stores = Stores::new();
        let user = stores.user_on("u1", SubscriptionTier::Free).await;
        let create = CreateWebsiteHandler::new(stores.websites.clone(), stores.quota());
        let delete = DeleteWebsiteHandler::new(
            stores.websites.clone(),
            stores.analytics.clone(),
            stores.quota(),
        );
        let command = || CreateWebsiteCommand {
            user_id: user.clone(),
            name: "Site".to_string(),
            prompt: "p".to_string(),
            html: PAGE.to_string(),
        };

        let website = create.handle(command()).await.unwrap();
        stores.analytics.record_view(website.id(), true).await.unwrap();

        delete
            .handle(DeleteWebsiteCommand {
                user_id: user.clone(),
                website_id: *website.id(),
            })
            .await
            .unwrap();

        assert!(stores.websites.is_empty());
        assert_eq!(stores.analytics.find_counters(website.id()).await.unwrap().views, 0);
        let profile = stores.profiles.find(&user).await.unwrap().unwrap();
        assert_eq!(profile.usage.project_count, 0);

        // The free slot can be used again.
        assert!(create.handle(command()).await.is_ok());
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let stores = Stores::new();
        let owner = stores.user_on("owner", SubscriptionTier::Basic).await;
        let website = CreateWebsiteHandler::new(stores.websites.clone(), stores.quota())
            .handle(CreateWebsiteCommand {
                user_id: owner,
                name: "Site".to_string(),
                prompt: "p".to_string(),
                html: PAGE.to_string(),
            })
            .await
            .unwrap();

        let err = DeleteWebsiteHandler::new(
            stores.websites.clone(),
            stores.analytics.clone(),
            stores.quota(),
        )
        .handle(DeleteWebsiteCommand {
            user_id: UserId::new("intruder").unwrap(),
            website_id: *website.id(),
        })
        .await
        .unwrap_err();

        assert_eq!(err, WebsiteError::Forbidden);
        assert_eq!(stores.websites.len(), 1);
    }
}

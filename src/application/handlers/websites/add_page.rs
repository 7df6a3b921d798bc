//! AddPageHandler - Adds a page to a website within the tier's page limit.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::{Page, Website, WebsiteError};
use crate::ports::WebsiteRepository;

use super::load_owned;

#[derive(Debug, Clone)]
pub struct AddPageCommand {
    pub user_id: UserId,
    pub website_id: WebsiteId,
    pub path: String,
    pub html: String,
}

pub struct AddPageHandler {
    repository: Arc<dyn WebsiteRepository>,
    quota: UsageQuota,
}

impl AddPageHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>, quota: UsageQuota) -> Self {
        Self { repository, quota }
    }

    pub async fn handle(&self, cmd: AddPageCommand) -> Result<Website, WebsiteError> {
        let page = Page::new(cmd.path, cmd.html)?;
        let mut website =
            load_owned(self.repository.as_ref(), &cmd.website_id, &cmd.user_id).await?;
        let tier = self.quota.tier_of(&cmd.user_id).await?;

        website.add_page(tier, page)?;
        self.repository.update(&website).await?;

        tracing::info!(website_id = %cmd.website_id, pages = website.page_count(), "Page added");
        Ok(website)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::websites::test_support::{Stores, PAGE};
    use crate::domain::subscription::{SubscriptionError, SubscriptionTier};

    async fn setup(tier: SubscriptionTier) -> (Stores, UserId, WebsiteId) {
        let stores = Stores::new();
        let user = stores.user_on("u1", tier).await;
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

    fn command(user: &UserId, id: WebsiteId, path: &str) -> AddPageCommand {
        AddPageCommand {
            user_id: user.clone(),
            website_id: id,
            path: path.to_string(),
            html: PAGE.to_string(),
        }
    }

    #[tokio::test]
    async fn basic_tier_can_add_pages() {
        let (stores, user, id) = setup(SubscriptionTier::Basic).await;
        let handler = AddPageHandler::new(stores.websites.clone(), stores.quota());

        let website = handler.handle(command(&user, id, "/about")).await.unwrap();

        assert_eq!(website.page_count(), 2);
        let stored = stores.websites.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.page_count(), 2);
    }

    #[tokio::test]
    async fn free_tier_is_limited_to_one_page() {
        let (stores, user, id) = setup(SubscriptionTier::Free).await;
        let handler = AddPageHandler::new(stores.websites.clone(), stores.quota());

        let err = handler.handle(command(&user, id, "/about")).await.unwrap_err();

        assert!(matches!(
            err,
            WebsiteError::Subscription(SubscriptionError::LimitReached { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_path_is_rejected() {
        let (stores, user, id) = setup(SubscriptionTier::Pro).await;
        let handler = AddPageHandler::new(stores.websites.clone(), stores.quota());

        let err = handler.handle(command(&user, id, "about us")).await.unwrap_err();
        assert!(matches!(err, WebsiteError::ValidationFailed { .. }));
    }
}

//! Website queries: single website and the caller's list.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::{Website, WebsiteError};
use crate::ports::WebsiteRepository;

use super::load_owned;

#[derive(Debug, Clone)]
pub struct GetWebsiteQuery {
    pub user_id: UserId,
    pub website_id: WebsiteId,
}

pub struct GetWebsiteHandler {
    repository: Arc<dyn WebsiteRepository>,
}

impl GetWebsiteHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetWebsiteQuery) -> Result<Website, WebsiteError> {
        load_owned(self.repository.as_ref(), &query.website_id, &query.user_id).await
    }
}

#[derive(Debug, Clone)]
pub struct ListWebsitesQuery {
    pub user_id: UserId,
}

pub struct ListWebsitesHandler {
    repository: Arc<dyn WebsiteRepository>,
}

impl ListWebsitesHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>) -> Self {
        Self { repository }
    }

    /// Most recently updated first.
    pub async fn handle(&self, query: ListWebsitesQuery) -> Result<Vec<Website>, WebsiteError> {
        Ok(self.repository.find_by_user_id(&query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::websites::test_support::{Stores, PAGE};
    use crate::domain::subscription::SubscriptionTier;

    async fn stored(stores: &Stores, owner: &UserId) -> Website {
        let website = Website::new(
            WebsiteId::new(),
            owner.clone(),
            "Site".to_string(),
            "prompt".to_string(),
            PAGE.to_string(),
        )
        .unwrap();
        stores.websites.save(&website).await.unwrap();
        website
    }

    #[tokio::test]
    async fn owner_can_read_and_others_cannot() {
        let stores = Stores::new();
        let owner = stores.user_on("owner", SubscriptionTier::Free).await;
        let website = stored(&stores, &owner).await;
        let handler = GetWebsiteHandler::new(stores.websites.clone());

        let found = handler
            .handle(GetWebsiteQuery {
                user_id: owner,
                website_id: *website.id(),
            })
            .await
            .unwrap();
        assert_eq!(found.id(), website.id());

        let err = handler
            .handle(GetWebsiteQuery {
                user_id: UserId::new("intruder").unwrap(),
                website_id: *website.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, WebsiteError::Forbidden);
    }

    #[tokio::test]
    async fn missing_website_is_not_found() {
        let stores = Stores::new();
        let handler = GetWebsiteHandler::new(stores.websites.clone());
        let id = WebsiteId::new();

        let err = handler
            .handle(GetWebsiteQuery {
                user_id: UserId::new("u1").unwrap(),
                website_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, WebsiteError::NotFound(id));
    }

    #[tokio::test]
    async fn list_only_returns_own_websites() {
        let stores = Stores::new();
        let alice = stores.user_on("alice", SubscriptionTier::Pro).await;
        let bob = stores.user_on("bob", SubscriptionTier::Pro).await;
        stored(&stores, &alice).await;
        stored(&stores, &alice).await;
        stored(&stores, &bob).await;

        let listed = ListWebsitesHandler::new(stores.websites.clone())
            .handle(ListWebsitesQuery { user_id: alice })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }
}

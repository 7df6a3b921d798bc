//! RecordViewHandler - Counts a page view on a published website.

use std::sync::Arc;

use crate::domain::analytics::{AnalyticsError, PageAnalytics};
use crate::domain::foundation::WebsiteId;
use crate::ports::{AnalyticsRepository, WebsiteRepository};

#[derive(Debug, Clone)]
pub struct RecordViewCommand {
    pub website_id: WebsiteId,
    /// True on the visitor's first view; bumps unique visitors too.
    pub new_visitor: bool,
}

pub struct RecordViewHandler {
    websites: Arc<dyn WebsiteRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
}

impl RecordViewHandler {
    pub fn new(websites: Arc<dyn WebsiteRepository>, analytics: Arc<dyn AnalyticsRepository>) -> Self {
        Self {
            websites,
            analytics,
        }
    }

    pub async fn handle(&self, cmd: RecordViewCommand) -> Result<PageAnalytics, AnalyticsError> {
        ensure_exists(self.websites.as_ref(), &cmd.website_id).await?;
        let counters = self
            .analytics
            .record_view(&cmd.website_id, cmd.new_visitor)
            .await?;

        tracing::debug!(website_id = %cmd.website_id, views = counters.views, "View recorded");
        Ok(counters)
    }
}

pub(crate) async fn ensure_exists(
    websites: &dyn WebsiteRepository,
    website_id: &WebsiteId,
) -> Result<(), AnalyticsError> {
    match websites.find_by_id(website_id).await? {
        Some(_) => Ok(()),
        None => Err(AnalyticsError::WebsiteNotFound(*website_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAnalyticsRepository, InMemoryWebsiteRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::website::Website;

    async fn setup() -> (RecordViewHandler, WebsiteId) {
        let websites = Arc::new(InMemoryWebsiteRepository::new());
        let website = Website::new(
            WebsiteId::new(),
            UserId::new("u1").unwrap(),
            "Site".to_string(),
            "p".to_string(),
            "<!DOCTYPE html><html></html>".to_string(),
        )
        .unwrap();
        websites.save(&website).await.unwrap();
        let handler = RecordViewHandler::new(websites, Arc::new(InMemoryAnalyticsRepository::new()));
        (handler, *website.id())
    }

    #[tokio::test]
    async fn returning_visitor_only_adds_a_view() {
        let (handler, id) = setup().await;
        handler
            .handle(RecordViewCommand { website_id: id, new_visitor: true })
            .await
            .unwrap();
        let counters = handler
            .handle(RecordViewCommand { website_id: id, new_visitor: false })
            .await
            .unwrap();

        assert_eq!(counters.views, 2);
        assert_eq!(counters.unique_visitors, 1);
    }

    #[tokio::test]
    async fn unknown_website_is_not_found() {
        let (handler, _) = setup().await;
        let missing = WebsiteId::new();
        let err = handler
            .handle(RecordViewCommand { website_id: missing, new_visitor: true })
            .await
            .unwrap_err();
        assert_eq!(err, AnalyticsError::WebsiteNotFound(missing));
    }
}

//! SubmitFormHandler - Stores a visitor's form submission.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::analytics::{AnalyticsError, FormSubmission};
use crate::domain::foundation::WebsiteId;
use crate::ports::{AnalyticsRepository, WebsiteRepository};

use super::record_view::ensure_exists;

#[derive(Debug, Clone)]
pub struct SubmitFormCommand {
    pub website_id: WebsiteId,
    pub data: Value,
}

pub struct SubmitFormHandler {
    websites: Arc<dyn WebsiteRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
}

impl SubmitFormHandler {
    pub fn new(websites: Arc<dyn WebsiteRepository>, analytics: Arc<dyn AnalyticsRepository>) -> Self {
        Self {
            websites,
            analytics,
        }
    }

    pub async fn handle(&self, cmd: SubmitFormCommand) -> Result<FormSubmission, AnalyticsError> {
        let submission = FormSubmission::new(cmd.website_id, cmd.data)?;
        ensure_exists(self.websites.as_ref(), &cmd.website_id).await?;
        self.analytics.save_submission(&submission).await?;

        tracing::info!(
            website_id = %cmd.website_id,
            submission_id = %submission.id,
            "Form submission stored"
        );
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAnalyticsRepository, InMemoryWebsiteRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::website::Website;
    use serde_json::json;

    #[tokio::test]
    async fn stores_submission_for_existing_site() {
        let websites = Arc::new(InMemoryWebsiteRepository::new());
        let analytics = Arc::new(InMemoryAnalyticsRepository::new());
        let website = Website::new(
            WebsiteId::new(),
            UserId::new("u1").unwrap(),
            "Site".to_string(),
            "p".to_string(),
            "<!DOCTYPE html><html></html>".to_string(),
        )
        .unwrap();
        websites.save(&website).await.unwrap();
        let handler = SubmitFormHandler::new(websites, analytics.clone());

        handler
            .handle(SubmitFormCommand {
                website_id: *website.id(),
                data: json!({"email": "visitor@example.com"}),
            })
            .await
            .unwrap();

        assert_eq!(analytics.submissions_for(website.id()).len(), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let handler = SubmitFormHandler::new(
            Arc::new(InMemoryWebsiteRepository::new()),
            Arc::new(InMemoryAnalyticsRepository::new()),
        );
        let err = handler
            .handle(SubmitFormCommand {
                website_id: WebsiteId::new(),
                data: json!({}),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::ValidationFailed { .. }));
    }
}

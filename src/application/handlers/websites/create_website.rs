//! CreateWebsiteHandler - Command handler for storing a generated website.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::{Website, WebsiteError};
use crate::ports::WebsiteRepository;

#[derive(Debug, Clone)]
pub struct CreateWebsiteCommand {
    pub user_id: UserId,
    pub name: String,
    pub prompt: String,
    /// Home page HTML.
    pub html: String,
}

/// Handler for creating websites.
///
/// Takes a project slot from the owner's quota; the slot is returned if the
/// website cannot be stored.
pub struct CreateWebsiteHandler {
    repository: Arc<dyn WebsiteRepository>,
    quota: UsageQuota,
}

impl CreateWebsiteHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>, quota: UsageQuota) -> Self {
        Self { repository, quota }
    }

    pub async fn handle(&self, cmd: CreateWebsiteCommand) -> Result<Website, WebsiteError> {
        let website = Website::new(
            WebsiteId::new(),
            cmd.user_id.clone(),
            cmd.name,
            cmd.prompt,
            cmd.html,
        )?;

        self.quota.reserve_project(&cmd.user_id).await?;

        if let Err(err) = self.repository.save(&website).await {
            tracing::error!(user_id = %cmd.user_id, error = %err, "Failed to store website");
            if let Err(release_err) = self.quota.release_project(&cmd.user_id).await {
                tracing::error!(error = %release_err, "Failed to release project slot");
            }
            return Err(err.into());
        }

        tracing::info!(user_id = %cmd.user_id, website_id = %website.id(), "Website created");
        Ok(website)
    }
}

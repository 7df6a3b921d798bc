//! UpdatePageHandler - Applies an AI iteration to one page.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::{Website, WebsiteError};
use crate::ports::WebsiteRepository;

use super::load_owned;

#[derive(Debug, Clone)]
pub struct UpdatePageCommand {
    pub user_id: UserId,
    pub website_id: WebsiteId,
    pub index: usize,
    pub html: String,
}

pub struct UpdatePageHandler {
    repository: Arc<dyn WebsiteRepository>,
    quota: UsageQuota,
}

impl UpdatePageHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>, quota: UsageQuota) -> Self {
        Self { repository, quota }
    }

    pub async fn handle(&self, cmd: UpdatePageCommand) -> Result<Website, WebsiteError> {
        let mut website =
            load_owned(self.repository.as_ref(), &cmd.website_id, &cmd.user_id).await?;
        let tier = self.quota.tier_of(&cmd.user_id).await?;

        website.apply_iteration(tier, cmd.index, cmd.html)?;
        self.repository.update(&website).await?;

        tracing::info!(
            website_id = %cmd.website_id,
            page = cmd.index,
            iterations = website.ai_iterations(),
            "Page iteration applied"
        );
        Ok(website)
    }
}

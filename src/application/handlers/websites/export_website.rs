//! ExportWebsiteHandler - Renders a website for download.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::subscription::{
    feature_gate, ExportFormat, SubscriptionError, SubscriptionTier, TierLimits,
};
use crate::domain::website::export::{self, ExportedDocument};
use crate::domain::website::WebsiteError;
use crate::ports::WebsiteRepository;

use super::load_owned;

#[derive(Debug, Clone)]
pub struct ExportWebsiteQuery {
    pub user_id: UserId,
    pub website_id: WebsiteId,
    pub format: ExportFormat,
}

/// Handler for exports.
///
/// Requires the tier to allow downloads at all and to list the format.
/// The download gate is checked first, so the watermark flag only applies
/// to tiers that can download.
pub struct ExportWebsiteHandler {
    repository: Arc<dyn WebsiteRepository>,
    quota: UsageQuota,
}

impl ExportWebsiteHandler {
    pub fn new(repository: Arc<dyn WebsiteRepository>, quota: UsageQuota) -> Self {
        Self { repository, quota }
    }

    pub async fn handle(&self, query: ExportWebsiteQuery) -> Result<ExportedDocument, WebsiteError> {
        let website =
            load_owned(self.repository.as_ref(), &query.website_id, &query.user_id).await?;
        let tier = self.quota.tier_of(&query.user_id).await?;

        if !feature_gate::can_download(tier) {
            return Err(SubscriptionError::feature_not_included(
                "download",
                tier,
                lowest_tier_with_download(),
            )
            .into());
        }

        let permission = feature_gate::can_export_format(tier, query.format);
        if !permission.allowed {
            return Err(SubscriptionError::feature_not_included(
                format!("{} export", query.format.as_str()),
                tier,
                permission.required_tier,
            )
            .into());
        }

        let limits = TierLimits::for_tier(tier);
        let document = export::render(&website, query.format, limits.watermark);

        tracing::info!(
            website_id = %query.website_id,
            format = query.format.as_str(),
            "Website exported"
        );
        Ok(document)
    }
}

fn lowest_tier_with_download() -> Option<SubscriptionTier> {
    SubscriptionTier::ALL
        .into_iter()
        .find(|tier| feature_gate::can_download(*tier))
}

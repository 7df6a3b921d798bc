//! CheckExportHandler - Query handler for export-format permission.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::feature_gate::{self, ExportPermission};
use crate::domain::subscription::{ExportFormat, SubscriptionError, UsageMonth};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct CheckExportQuery {
    pub user_id: UserId,
    pub format: ExportFormat,
}

pub struct CheckExportHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl CheckExportHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: CheckExportQuery) -> Result<ExportPermission, SubscriptionError> {
        let profile = self
            .profiles
            .find_or_create(&query.user_id, None, UsageMonth::current())
            .await?;

        Ok(feature_gate::can_export_format(profile.tier, query.format))
    }
}

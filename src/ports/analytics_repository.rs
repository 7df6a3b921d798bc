//! Analytics repository port.
//!
//! View counters and form submissions for published websites.

use async_trait::async_trait;

use crate::domain::analytics::{FormSubmission, PageAnalytics};
use crate::domain::foundation::{DomainError, WebsiteId};

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Count one view (and one unique visitor when `new_visitor`), creating
    /// the counter row on first use. Returns the counters after the update.
    async fn record_view(
        &self,
        website_id: &WebsiteId,
        new_visitor: bool,
    ) -> Result<PageAnalytics, DomainError>;

    /// Current counters; zeroes when nothing was recorded yet.
    async fn find_counters(&self, website_id: &WebsiteId) -> Result<PageAnalytics, DomainError>;

    /// Store a form submission.
    async fn save_submission(&self, submission: &FormSubmission) -> Result<(), DomainError>;

    /// Number of submissions for a website.
    async fn count_submissions(&self, website_id: &WebsiteId) -> Result<u64, DomainError>;

    /// Drop every counter and submission of a website.
    async fn delete_for_website(&self, website_id: &WebsiteId) -> Result<(), DomainError>;
}

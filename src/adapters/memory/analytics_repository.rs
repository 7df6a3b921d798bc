//! In-memory implementation of AnalyticsRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::analytics::{FormSubmission, PageAnalytics};
use crate::domain::foundation::{DomainError, WebsiteId};
use crate::ports::AnalyticsRepository;

#[derive(Default)]
pub struct InMemoryAnalyticsRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    counters: HashMap<WebsiteId, PageAnalytics>,
    submissions: Vec<FormSubmission>,
}

impl InMemoryAnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions stored for a website, oldest first.
    pub fn submissions_for(&self, website_id: &WebsiteId) -> Vec<FormSubmission> {
        self.state
            .lock()
            .unwrap()
            .submissions
            .iter()
            .filter(|s| &s.website_id == website_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn record_view(
        &self,
        website_id: &WebsiteId,
        new_visitor: bool,
    ) -> Result<PageAnalytics, DomainError> {
        let mut state = self.state.lock().unwrap();
        let counters = state
            .counters
            .entry(*website_id)
            .or_insert_with(|| PageAnalytics::empty(*website_id));
        counters.record_view(new_visitor);
        Ok(*counters)
    }

    async fn find_counters(&self, website_id: &WebsiteId) -> Result<PageAnalytics, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .counters
            .get(website_id)
            .copied()
            .unwrap_or_else(|| PageAnalytics::empty(*website_id)))
    }

    async fn save_submission(&self, submission: &FormSubmission) -> Result<(), DomainError> {
        self.state.lock().unwrap().submissions.push(submission.clone());
        Ok(())
    }

    async fn count_submissions(&self, website_id: &WebsiteId) -> Result<u64, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .submissions
            .iter()
            .filter(|s| &s.website_id == website_id)
            .count() as u64)
    }

    async fn delete_for_website(&self, website_id: &WebsiteId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.counters.remove(website_id);
        state.submissions.retain(|s| &s.website_id != website_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn views_accumulate_and_unknown_site_reads_zero() {
        let repo = InMemoryAnalyticsRepository::new();
        let site = WebsiteId::new();

        assert_eq!(repo.find_counters(&site).await.unwrap().views, 0);

        repo.record_view(&site, true).await.unwrap();
        let counters = repo.record_view(&site, false).await.unwrap();
        assert_eq!(counters.views, 2);
        assert_eq!(counters.unique_visitors, 1);
    }

    #[tokio::test]
    async fn delete_for_website_clears_both_stores() {
        let repo = InMemoryAnalyticsRepository::new();
        let site = WebsiteId::new();
        let other = WebsiteId::new();
        repo.record_view(&site, true).await.unwrap();
        for id in [site, other] {
            let submission = FormSubmission::new(id, json!({"email": "x@y.z"})).unwrap();
            repo.save_submission(&submission).await.unwrap();
        }

        repo.delete_for_website(&site).await.unwrap();

        assert_eq!(repo.count_submissions(&site).await.unwrap(), 0);
        assert_eq!(repo.count_submissions(&other).await.unwrap(), 1);
        assert_eq!(repo.find_counters(&site).await.unwrap().views, 0);
    }
}

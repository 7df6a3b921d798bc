//! PostgreSQL implementation of AnalyticsRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::analytics::{FormSubmission, PageAnalytics};
use crate::domain::foundation::{DomainError, WebsiteId};
use crate::ports::AnalyticsRepository;

pub struct PostgresAnalyticsRepository {
    pool: PgPool,
}

impl PostgresAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CountersRow {
    views: i64,
    unique_visitors: i64,
}

fn to_analytics(website_id: WebsiteId, row: CountersRow) -> Result<PageAnalytics, DomainError> {
    Ok(PageAnalytics {
        website_id,
        views: u64::try_from(row.views).map_err(|e| DomainError::database("Negative views", e))?,
        unique_visitors: u64::try_from(row.unique_visitors)
            .map_err(|e| DomainError::database("Negative unique_visitors", e))?,
    })
}

#[async_trait]
impl AnalyticsRepository for PostgresAnalyticsRepository {
    async fn record_view(
        &self,
        website_id: &WebsiteId,
        new_visitor: bool,
    ) -> Result<PageAnalytics, DomainError> {
        let unique_increment: i64 = if new_visitor { 1 } else { 0 };

        let row: CountersRow = sqlx::query_as(
            r#"
            INSERT INTO page_analytics (website_id, views, unique_visitors)
            VALUES ($1, 1, $2)
            ON CONFLICT (website_id) DO UPDATE
                SET views = page_analytics.views + 1,
                    unique_visitors = page_analytics.unique_visitors + $2,
                    updated_at = now()
            RETURNING views, unique_visitors
            "#,
        )
        .bind(website_id.as_uuid())
        .bind(unique_increment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to record view", e))?;

        to_analytics(*website_id, row)
    }

    async fn find_counters(&self, website_id: &WebsiteId) -> Result<PageAnalytics, DomainError> {
        let row: Option<CountersRow> = sqlx::query_as(
            "SELECT views, unique_visitors FROM page_analytics WHERE website_id = $1",
        )
        .bind(website_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch analytics", e))?;

        match row {
            Some(row) => to_analytics(*website_id, row),
            None => Ok(PageAnalytics::empty(*website_id)),
        }
    }

    async fn save_submission(&self, submission: &FormSubmission) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO form_submissions (id, website_id, data, submitted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(submission.id.as_uuid())
        .bind(submission.website_id.as_uuid())
        .bind(Json(&submission.data))
        .bind(submission.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save form submission", e))?;

        Ok(())
    }

    async fn count_submissions(&self, website_id: &WebsiteId) -> Result<u64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM form_submissions WHERE website_id = $1")
                .bind(website_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to count submissions", e))?;

        u64::try_from(count).map_err(|e| DomainError::database("Negative count", e))
    }

    async fn delete_for_website(&self, website_id: &WebsiteId) -> Result<(), DomainError> {
        // Both tables cascade from websites; explicit deletes keep this usable
        // before the website row itself is removed.
        sqlx::query("DELETE FROM form_submissions WHERE website_id = $1")
            .bind(website_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete submissions", e))?;

        sqlx::query("DELETE FROM page_analytics WHERE website_id = $1")
            .bind(website_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete analytics", e))?;

        Ok(())
    }
}

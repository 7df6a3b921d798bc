//! PostgreSQL implementation of WebsiteRepository.
//!
//! Pages are stored as a JSONB array on the website row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, WebsiteId};
use crate::domain::website::{Page, Website};
use crate::ports::WebsiteRepository;

/// PostgreSQL implementation of the WebsiteRepository port.
pub struct PostgresWebsiteRepository {
    pool: PgPool,
}

impl PostgresWebsiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WebsiteRow {
    id: Uuid,
    user_id: String,
    name: String,
    prompt: String,
    pages: Json<Vec<Page>>,
    ai_iterations: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WebsiteRow> for Website {
    type Error = DomainError;

    fn try_from(row: WebsiteRow) -> Result<Self, Self::Error> {
        Ok(Website::reconstitute(
            WebsiteId::from_uuid(row.id),
            UserId::new(row.user_id).map_err(|e| DomainError::database("Invalid user_id", e))?,
            row.name,
            row.prompt,
            row.pages.0,
            u32::try_from(row.ai_iterations)
                .map_err(|e| DomainError::database("Negative ai_iterations", e))?,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

fn not_found(id: &WebsiteId) -> DomainError {
    DomainError::new(ErrorCode::WebsiteNotFound, format!("Website not found: {}", id))
}

fn iterations_param(website: &Website) -> i32 {
    i32::try_from(website.ai_iterations()).unwrap_or(i32::MAX)
}

const WEBSITE_COLUMNS: &str =
    "id, user_id, name, prompt, pages, ai_iterations, created_at, updated_at";

#[async_trait]
impl WebsiteRepository for PostgresWebsiteRepository {
    async fn save(&self, website: &Website) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO websites (id, user_id, name, prompt, pages, ai_iterations, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(website.id().as_uuid())
        .bind(website.user_id().as_str())
        .bind(website.name())
        .bind(website.prompt())
        .bind(Json(website.pages()))
        .bind(iterations_param(website))
        .bind(website.created_at().as_datetime())
        .bind(website.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save website", e))?;

        Ok(())
    }

    async fn update(&self, website: &Website) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE websites SET
                name = $2,
                pages = $3,
                ai_iterations = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(website.id().as_uuid())
        .bind(website.name())
        .bind(Json(website.pages()))
        .bind(iterations_param(website))
        .bind(website.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update website", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(website.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &WebsiteId) -> Result<Option<Website>, DomainError> {
        let row: Option<WebsiteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM websites WHERE id = $1",
            WEBSITE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch website", e))?;

        row.map(Website::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Website>, DomainError> {
        let rows: Vec<WebsiteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM websites WHERE user_id = $1 ORDER BY updated_at DESC",
            WEBSITE_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list websites", e))?;

        rows.into_iter().map(Website::try_from).collect()
    }

    async fn delete(&self, id: &WebsiteId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete website", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

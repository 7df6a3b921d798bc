//! PostgreSQL implementation of ProfileRepository.
//!
//! Every counter change is a single conditional `UPDATE ... RETURNING`, so the
//! month reconciliation, limit check and increment happen atomically inside
//! Postgres. `Limit::Unlimited` is bound as `-1`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Limit, Profile, SubscriptionTier, UsageCounters, UsageMonth};
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of the ProfileRepository port.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    email: Option<String>,
    tier: String,
    generations_this_month: i32,
    project_count: i32,
    last_reset_month: String,
    stripe_customer_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let usage = CountersRow {
            generations_this_month: row.generations_this_month,
            project_count: row.project_count,
            last_reset_month: row.last_reset_month,
        }
        .try_into()?;

        Ok(Profile {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database("Invalid user_id", e))?,
            email: row.email,
            tier: row
                .tier
                .parse::<SubscriptionTier>()
                .map_err(|e| DomainError::database("Invalid tier value", e))?,
            usage,
            stripe_customer_id: row.stripe_customer_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CountersRow {
    generations_this_month: i32,
    project_count: i32,
    last_reset_month: String,
}

impl TryFrom<CountersRow> for UsageCounters {
    type Error = DomainError;

    fn try_from(row: CountersRow) -> Result<Self, Self::Error> {
        Ok(UsageCounters {
            generations_this_month: non_negative(row.generations_this_month)?,
            project_count: non_negative(row.project_count)?,
            last_reset_month: row
                .last_reset_month
                .parse::<UsageMonth>()
                .map_err(|e| DomainError::database("Invalid last_reset_month", e))?,
        })
    }
}

fn non_negative(value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|e| DomainError::database("Negative counter", e))
}

/// Bind value for a limit; `-1` means unlimited.
fn limit_param(limit: Limit) -> i64 {
    limit.as_i64()
}

const PROFILE_COLUMNS: &str = "user_id, email, tier, generations_this_month, project_count, \
     last_reset_month, stripe_customer_id, created_at, updated_at";

const COUNTER_COLUMNS: &str = "generations_this_month, project_count, last_reset_month";

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_or_create(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        month: UsageMonth,
    ) -> Result<Profile, DomainError> {
        // DO UPDATE (not DO NOTHING) so RETURNING yields the existing row too.
        let row: ProfileRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO profiles (user_id, email, tier, generations_this_month, project_count, last_reset_month)
            VALUES ($1, $2, 'free', 0, 0, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET email = COALESCE(profiles.email, EXCLUDED.email)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(email)
        .bind(month.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load or create profile", e))?;

        row.try_into()
    }

    async fn reset_monthly_usage(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<UsageCounters, DomainError> {
        let reset: Option<CountersRow> = sqlx::query_as(&format!(
            r#"
            UPDATE profiles
               SET generations_this_month = 0,
                   last_reset_month = $2,
                   updated_at = now()
             WHERE user_id = $1 AND last_reset_month <> $2
            RETURNING {}
            "#,
            COUNTER_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(month.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to reset monthly usage", e))?;

        if let Some(row) = reset {
            tracing::info!(user_id = %user_id, month = %month, "Monthly usage reset");
            return row.try_into();
        }

        // Already current (another request may have reset it first).
        let row: Option<CountersRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            COUNTER_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch usage", e))?;

        row.ok_or_else(|| DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"))?
            .try_into()
    }

    async fn try_reserve_generation(
        &self,
        user_id: &UserId,
        month: UsageMonth,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError> {
        let row: Option<CountersRow> = sqlx::query_as(&format!(
            r#"
            UPDATE profiles
               SET generations_this_month = CASE WHEN last_reset_month = $2
                                                 THEN generations_this_month + 1
                                                 ELSE 1 END,
                   last_reset_month = $2,
                   updated_at = now()
             WHERE user_id = $1
               AND ($3 < 0 OR (CASE WHEN last_reset_month = $2
                                    THEN generations_this_month
                                    ELSE 0 END) < $3)
            RETURNING {}
            "#,
            COUNTER_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(month.to_string())
        .bind(limit_param(limit))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to reserve generation", e))?;

        row.map(UsageCounters::try_from).transpose()
    }

    async fn release_generation(
        &self,
        user_id: &UserId,
        month: UsageMonth,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE profiles
               SET generations_this_month = generations_this_month - 1,
                   updated_at = now()
             WHERE user_id = $1 AND last_reset_month = $2 AND generations_this_month > 0
            "#,
        )
        .bind(user_id.as_str())
        .bind(month.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to release generation", e))?;

        Ok(())
    }

    async fn try_reserve_project(
        &self,
        user_id: &UserId,
        limit: Limit,
    ) -> Result<Option<UsageCounters>, DomainError> {
        let row: Option<CountersRow> = sqlx::query_as(&format!(
            r#"
            UPDATE profiles
               SET project_count = project_count + 1,
                   updated_at = now()
             WHERE user_id = $1 AND ($2 < 0 OR project_count < $2)
            RETURNING {}
            "#,
            COUNTER_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(limit_param(limit))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to reserve project", e))?;

        row.map(UsageCounters::try_from).transpose()
    }

    async fn release_project(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE profiles
               SET project_count = project_count - 1,
                   updated_at = now()
             WHERE user_id = $1 AND project_count > 0
            "#,
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to release project", e))?;

        Ok(())
    }

    async fn update_tier(
        &self,
        user_id: &UserId,
        tier: SubscriptionTier,
        stripe_customer_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
               SET tier = $2,
                   stripe_customer_id = COALESCE($3, stripe_customer_id),
                   updated_at = now()
             WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(tier.as_str())
        .bind(stripe_customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update tier", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", user_id),
            ));
        }

        Ok(())
    }

    async fn find_by_stripe_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE stripe_customer_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile by customer", e))?;

        row.map(Profile::try_from).transpose()
    }
}

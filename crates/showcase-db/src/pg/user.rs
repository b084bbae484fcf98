//! PostgreSQL user tier repository implementation

use async_trait::async_trait;
use showcase_types::{Tier, UserId};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::UserRow;
use crate::repo::UserRepository;

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_subject(&self, subject: &UserId) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT subject, email, tier, created_at, updated_at
            FROM users
            WHERE subject = $1
            "#,
        )
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_tier(&self, subject: &UserId, tier: Tier) -> DbResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (subject, tier)
            VALUES ($1, $2)
            ON CONFLICT (subject)
            DO UPDATE SET tier = EXCLUDED.tier, updated_at = now()
            RETURNING subject, email, tier, created_at, updated_at
            "#,
        )
        .bind(subject.as_str())
        .bind(tier.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, subject: &UserId) -> DbResult<()> {
        sqlx::query("DELETE FROM users WHERE subject = $1")
            .bind(subject.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

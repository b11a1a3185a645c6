//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StorageError};
use crate::utils::db_error::{SHORT_CODE_CONSTRAINT, is_unique_violation_on_code};

/// Row shape returned by `INSERT ... RETURNING`.
///
/// `id` is cast to `BIGINT` in the query so tables created with a `SERIAL`
/// key decode the same way as the `BIGSERIAL` one from our migration.
#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.id, row.original_url, row.short_code, row.created_at)
    }
}

/// PostgreSQL repository for the `urls` table.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, short_code: &str) -> Result<bool, StorageError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM urls WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StorageError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO urls (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id::BIGINT AS id, original_url, short_code, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StorageError::UniqueViolation {
                    constraint: SHORT_CODE_CONSTRAINT.to_string(),
                }
            } else {
                StorageError::Backend(e)
            }
        })?;

        Ok(row.into())
    }

    async fn lookup(&self, short_code: &str) -> Result<Option<String>, StorageError> {
        let original_url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

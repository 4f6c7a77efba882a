//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters for every value; click increments are a single
/// atomic `UPDATE`, so concurrent redirects never lose counts.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    total_clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.code,
            r.long_url,
            r.created_at,
            r.total_clicks,
            r.last_clicked,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, long_url)
            VALUES ($1, $2)
            RETURNING id, code, long_url, created_at, total_clicks, last_clicked
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, long_url, created_at, total_clicks, last_clicked
            FROM links
            WHERE code = $1
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, long_url, created_at, total_clicks, last_clicked
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked = NOW()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(code, "Click for unknown code ignored");
        }

        Ok(())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

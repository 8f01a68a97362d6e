//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};

/// Name of the unique constraint on `links.code`.
const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

const LINK_COLUMNS: &str = "id, code, url, clicks, last_clicked, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    url: String,
    clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            code: row.code,
            url: row.url,
            clicks: row.clicks,
            last_clicked: row.last_clicked,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link storage.
///
/// Each operation is one SQL statement. Deadlines are applied by
/// [`super::TimeoutLinkRepository`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Checks that the database answers a trivial query.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

/// True for a unique violation on `links.code`.
fn is_code_conflict(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(CODE_UNIQUE_CONSTRAINT)
}

/// Maps a sqlx error into a retryable storage error.
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable(e.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            RepositoryError::Unavailable(other.to_string())
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let query = format!("INSERT INTO links (code, url) VALUES ($1, $2) RETURNING {LINK_COLUMNS}");

        let inserted = sqlx::query_as::<_, LinkRow>(&query)
            .bind(&new_link.code)
            .bind(&new_link.url)
            .fetch_one(self.pool.as_ref())
            .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            Err(e) if is_code_conflict(&e) => Err(RepositoryError::Duplicate {
                code: new_link.code,
            }),
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        let query = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&query)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        let query = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC");

        let rows = sqlx::query_as::<_, LinkRow>(&query)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        let query = format!(
            "UPDATE links SET clicks = clicks + 1, last_clicked = NOW() WHERE code = $1 RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&query)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }
}

//! SQLite storage.
//!
//! One pool is opened at startup with `connect`, migrated with `migrate`, and
//! shared by every repository. Foreign keys are enforced on each connection;
//! deleting an event removes its tag links, deleting a category clears
//! `category_id` on its events.
//!
//! Timestamps are stored as RFC 3339 text, which sorts chronologically.

mod event_repository;
mod label_repository;
mod query;
mod rows;
mod user_repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use eventdesk_core::prelude::*;

pub use event_repository::SqliteEventRepository;
pub use label_repository::{SqliteCategoryRepository, SqliteLabelRepository, SqliteTagRepository};
pub use user_repository::SqliteUserRepository;

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Schema version written by `migrate`.
pub const SCHEMA_VERSION: i64 = 1;

/// Open a pool for `url` (`sqlite://path/to.db` or `sqlite::memory:`).
///
/// Missing database files are created. An in-memory database lives only as
/// long as its connection, so it gets exactly one that is never recycled.
#[instrument(skip_all, fields(url = %url))]
pub async fn connect(url: &str, max_connections: u32) -> DeskResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| DeskError::configuration(format!("invalid database url '{url}': {e}")))?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| ApplicationError::repository("connect", e))?;

    info!(in_memory, "Database pool opened");
    Ok(pool)
}

/// Create missing tables and indexes. Safe to run on every start.
#[instrument(skip_all)]
pub async fn migrate(pool: &SqlitePool) -> DeskResult<()> {
    let before = schema_version(pool).await?;
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| ApplicationError::repository("migrate", e))?;

    if before < SCHEMA_VERSION {
        info!(from = before, to = SCHEMA_VERSION, "Database schema migrated");
    } else {
        debug!(version = before, "Database schema already current");
    }
    Ok(())
}

/// `PRAGMA user_version`; 0 on a fresh database.
pub async fn schema_version(pool: &SqlitePool) -> DeskResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(|e| ApplicationError::repository("schema_version", e))?;
    Ok(version)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub async fn memory_pool() -> SqlitePool {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        migrate(&pool).await.unwrap();
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = connect("sqlite::memory:", 4).await.unwrap();
        assert_eq!(schema_version(&pool).await.unwrap(), 0);
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();
        assert_eq!(schema_version(&pool).await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.db");
        let url = format!("sqlite://{}", path.display());
        let pool = connect(&url, 2).await.unwrap();
        migrate(&pool).await.unwrap();
        assert!(path.exists());
    }
}

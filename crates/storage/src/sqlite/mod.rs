//! `SQLite`-backed catalogue store.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{CategoryRepository, QuestionRepository, Storage};

mod category_repo;
mod mapping;
mod migrate;
mod question_repo;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run on every pooled connection. Deleting a category cascades to its
/// questions only while `foreign_keys` is on.
const CONNECTION_PRAGMAS: [&str; 3] = [
    "PRAGMA foreign_keys = ON;",
    "PRAGMA journal_mode = WAL;",
    "PRAGMA busy_timeout = 5000;",
];

/// Both repository traits over one connection pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error("could not open catalogue database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("catalogue schema migration failed: {0}")]
    Migrate(#[source] sqlx::Error),
}

impl SqliteRepository {
    /// Open the catalogue at `database_url` and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError::Connect` if the pool cannot be created or a
    /// connection pragma fails, and `SqliteInitError::Migrate` if the schema
    /// cannot be applied.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await
            .map_err(SqliteInitError::Connect)?;

        migrate::run_migrations(&pool)
            .await
            .map_err(SqliteInitError::Migrate)?;
        Ok(Self { pool })
    }
}

impl Storage {
    /// A `Storage` whose repositories share one `SQLite` pool.
    ///
    /// # Errors
    ///
    /// See [`SqliteRepository::open`].
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Ok(Self {
            categories,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{CategoryId, QuestionId};

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteRepository>();
    }

    #[test]
    fn ids_beyond_rowid_range_have_no_key() {
        assert_eq!(mapping::question_key(QuestionId::new(24)), Some(24));
        assert_eq!(mapping::question_key(QuestionId::new(1 << 63)), None);
        assert_eq!(mapping::category_key(CategoryId::new(u64::MAX)), None);
    }

    #[tokio::test]
    async fn open_reports_unreachable_database() {
        let err = SqliteRepository::open("sqlite:///no/such/dir/trivia.sqlite3")
            .await
            .err()
            .expect("missing directory must fail");
        assert!(matches!(err, SqliteInitError::Connect(_)));
    }

    #[tokio::test]
    async fn reopening_keeps_schema() {
        let url = "sqlite:file:memdb_reopen?mode=memory&cache=shared";
        let first = SqliteRepository::open(url).await.unwrap();
        SqliteRepository::open(url).await.unwrap();
        assert!(first.list_categories().await.unwrap().is_empty());
    }
}

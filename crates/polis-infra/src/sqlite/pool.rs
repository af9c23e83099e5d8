//! Session provider for the SQLite database.
//!
//! `DatabasePool` is the single connection factory shared by every entity
//! manager. Managers never touch the pool directly: they call
//! [`DatabasePool::session`] once per operation and run their unit of work on
//! the returned [`Session`]. The session goes back to the pool when it is
//! dropped, which happens on every exit path including `?` early returns and
//! panics.
//!
//! Creating tables is a separate, explicit step ([`DatabasePool::bootstrap`])
//! run by the embedding application at startup. It is idempotent and sessions
//! can be taken before or after it runs.

use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use polis_types::config::DatabaseConfig;
use polis_types::error::RepositoryError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};
use sqlx::{Connection, Sqlite, Transaction};

/// Shared SQLite connection factory.
///
/// Cloning is cheap and every clone hands out sessions on the same database.
#[derive(Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Open the connection factory described by `config`.
    ///
    /// Connections use WAL journal mode, foreign key enforcement, and the
    /// configured busy timeout. The database file is created if missing, but
    /// no tables are created; see [`Self::bootstrap`].
    pub async fn new(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let url = config.url.clone().unwrap_or_else(default_database_url);

        let opts = SqliteConnectOptions::from_str(&url)
            .map_err(|e| RepositoryError::Connection(format!("invalid database url '{url}': {e}")))?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(opts)
            .await
            .map_err(connection_error)?;

        tracing::debug!(url = %url, max_connections = config.max_connections, "database pool opened");

        Ok(Self { pool })
    }

    /// Open the pool and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let pool = Self::new(config).await?;
        pool.bootstrap().await?;
        Ok(pool)
    }

    /// Ensure the `users` and `conversations` tables exist.
    ///
    /// Runs the embedded migrations; already-applied migrations are skipped,
    /// so calling this repeatedly is harmless.
    pub async fn bootstrap(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Bootstrap(e.to_string()))?;

        tracing::info!("database schema ready");
        Ok(())
    }

    /// Check out one session for a single unit of work.
    ///
    /// The session is valid until it is dropped and must not be kept beyond
    /// the operation that requested it.
    pub async fn session(&self) -> Result<Session, RepositoryError> {
        let conn = self.pool.acquire().await.map_err(connection_error)?;
        tracing::trace!("session acquired");
        Ok(Session { conn })
    }

    /// Close every connection. Sessions requested afterwards fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One checked-out database connection, scoped to a single operation.
///
/// Derefs to [`SqliteConnection`] so queries can run directly against it.
/// Dropping the session returns the connection to the pool.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// Start a transaction so a read-then-write lands as one commit.
    ///
    /// If the transaction is dropped without `commit`, it rolls back.
    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>, RepositoryError> {
        Connection::begin(&mut *self.conn).await.map_err(query_error)
    }
}

impl Deref for Session {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.conn
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!("session released");
    }
}

pub(crate) fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn connection_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Connection(e.to_string())
}

/// Connection URL for the `polis.db` file inside `data_dir`.
pub fn database_url_for(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("polis.db").display())
}

/// Returns the default database URL based on `POLIS_DATA_DIR` env var,
/// falling back to `~/.polis/polis.db`.
pub fn default_database_url() -> String {
    database_url_for(&crate::config::resolve_data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &tempfile::TempDir, name: &str) -> DatabaseConfig {
        let db_path = dir.path().join(name);
        DatabaseConfig::with_url(format!("sqlite://{}?mode=rwc", db_path.display()))
    }

    async fn table_names(pool: &DatabasePool) -> Vec<String> {
        let mut session = pool.session().await.unwrap();
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&mut *session)
        .await
        .unwrap();
        tables.into_iter().map(|t| t.0).collect()
    }

    #[tokio::test]
    async fn test_bootstrap_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "test.db")).await.unwrap();

        let tables = table_names(&pool).await;
        assert!(tables.contains(&"users".to_string()), "users table missing");
        assert!(
            tables.contains(&"conversations".to_string()),
            "conversations table missing"
        );
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir, "twice.db");

        let pool = DatabasePool::connect(&config).await.unwrap();
        pool.bootstrap().await.unwrap();
        pool.close().await;

        // A fresh pool on the same file bootstraps again without complaint.
        let reopened = DatabasePool::connect(&config).await.unwrap();
        assert_eq!(table_names(&reopened).await, vec!["conversations", "users"]);
    }

    #[tokio::test]
    async fn test_session_usable_before_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&test_config(&dir, "early.db")).await.unwrap();

        assert!(table_names(&pool).await.is_empty());

        pool.bootstrap().await.unwrap();
        assert_eq!(table_names(&pool).await, vec!["conversations", "users"]);
    }

    #[tokio::test]
    async fn test_session_released_after_failed_query() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "release.db")).await.unwrap();

        async fn failing_unit_of_work(pool: &DatabasePool) -> Result<(), RepositoryError> {
            let mut session = pool.session().await?;
            sqlx::query("SELECT * FROM no_such_table")
                .execute(&mut *session)
                .await
                .map_err(query_error)?;
            Ok(())
        }

        let err = failing_unit_of_work(&pool).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));

        // The pool holds a single connection, so this only succeeds if the
        // failed operation gave its session back.
        let next = tokio::time::timeout(Duration::from_secs(5), pool.session()).await;
        assert!(next.expect("session was never released").is_ok());
    }

    #[tokio::test]
    async fn test_session_released_after_panic() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "panic.db")).await.unwrap();

        let task_pool = pool.clone();
        let handle = tokio::spawn(async move {
            let _session = task_pool.session().await.unwrap();
            panic!("unit of work blew up");
        });
        assert!(handle.await.is_err());

        let next = tokio::time::timeout(Duration::from_secs(5), pool.session()).await;
        assert!(next.expect("session was never released").is_ok());
    }

    #[tokio::test]
    async fn test_pool_foreign_keys_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "fk.db")).await.unwrap();
        let mut session = pool.session().await.unwrap();

        let result: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&mut *session)
            .await
            .unwrap();

        assert_eq!(result.0, 1, "foreign keys should be enabled");
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "wal.db")).await.unwrap();
        let mut session = pool.session().await.unwrap();

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&mut *session)
            .await
            .unwrap();

        assert_eq!(result.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_rolled_back_transaction_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::connect(&test_config(&dir, "tx.db")).await.unwrap();

        {
            let mut session = pool.session().await.unwrap();
            let mut tx = session.begin().await.unwrap();
            sqlx::query("INSERT INTO users (email, password) VALUES ('a@x.com', 'p1')")
                .execute(&mut *tx)
                .await
                .unwrap();
            // dropped without commit
        }

        let mut session = pool.session().await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *session)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[test]
    fn test_database_url_for() {
        let url = database_url_for(Path::new("/tmp/polis-test"));
        assert_eq!(url, "sqlite:///tmp/polis-test/polis.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let config = DatabaseConfig::with_url("sqlite:///polis-no-such-dir/nested/x.db");
        let err = DatabasePool::new(&config).await.err().unwrap();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }
}

//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `polis-core`. Each method takes one
//! session from the shared pool for the duration of the call.

use polis_core::repository::user::UserRepository;
use polis_types::error::RepositoryError;
use polis_types::user::{User, UserId};
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;

use super::pool::{query_error, DatabasePool};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: i64,
    email: String,
    password: String,
    privilege: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            privilege: row.try_get("privilege")?,
        })
    }

    fn into_user(self) -> User {
        User {
            id: UserId(self.id),
            email: self.email,
            password: self.password,
            privilege: self.privilege,
        }
    }
}

async fn fetch_user(conn: &mut SqliteConnection, id: UserId) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query("SELECT id, email, password, privilege FROM users WHERE id = ?")
        .bind(id.0)
        .fetch_optional(&mut *conn)
        .await
        .map_err(query_error)?;

    row.map(|row| UserRow::from_row(&row).map(UserRow::into_user))
        .transpose()
        .map_err(query_error)
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> Result<User, RepositoryError> {
        let mut session = self.pool.session().await?;

        let result = sqlx::query("INSERT INTO users (email, password, privilege) VALUES (?, ?, ?)")
            .bind(email)
            .bind(password)
            .bind(privilege)
            .execute(&mut *session)
            .await
            .map_err(query_error)?;

        let id = UserId(result.last_insert_rowid());
        tracing::debug!(user_id = %id, "user created");

        // Re-read so the caller sees exactly what the engine stored.
        fetch_user(&mut session, id).await?.ok_or_else(|| {
            RepositoryError::Query(format!("user {id} vanished after insert"))
        })
    }

    async fn read_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut session = self.pool.session().await?;
        fetch_user(&mut session, id).await
    }

    async fn read_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut session = self.pool.session().await?;

        let rows = sqlx::query("SELECT id, email, password, privilege FROM users")
            .fetch_all(&mut *session)
            .await
            .map_err(query_error)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            users.push(UserRow::from_row(row).map_err(query_error)?.into_user());
        }

        Ok(users)
    }

    async fn update_user(
        &self,
        id: UserId,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut session = self.pool.session().await?;
        let mut tx = session.begin().await?;

        let result =
            sqlx::query("UPDATE users SET email = ?, password = ?, privilege = ? WHERE id = ?")
                .bind(email)
                .bind(password)
                .bind(privilege)
                .bind(id.0)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!(user_id = %id, "update skipped, no such user");
            return Ok(None);
        }

        let user = fetch_user(&mut tx, id).await?;
        tx.commit().await.map_err(query_error)?;

        tracing::debug!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut session = self.pool.session().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.0)
            .execute(&mut *session)
            .await
            .map_err(query_error)?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(user_id = %id, deleted, "user delete");
        Ok(deleted)
    }
}

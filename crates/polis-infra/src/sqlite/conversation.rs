//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `polis-core` on the same session
//! provider as the user repository. The `creator_id` foreign key is enforced
//! by SQLite; a violation comes back as a query error.

use polis_core::repository::conversation::ConversationRepository;
use polis_types::conversation::{Conversation, ConversationId};
use polis_types::error::RepositoryError;
use polis_types::user::UserId;
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;

use super::pool::{query_error, DatabasePool};

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: i64,
    title: String,
    description: String,
    creator_id: i64,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            creator_id: row.try_get("creator_id")?,
        })
    }

    fn into_conversation(self) -> Conversation {
        Conversation {
            id: ConversationId(self.id),
            title: self.title,
            description: self.description,
            creator_id: UserId(self.creator_id),
        }
    }
}

async fn fetch_conversation(
    conn: &mut SqliteConnection,
    id: ConversationId,
) -> Result<Option<Conversation>, RepositoryError> {
    let row = sqlx::query(
        "SELECT id, title, description, creator_id FROM conversations WHERE id = ?",
    )
    .bind(id.0)
    .fetch_optional(&mut *conn)
    .await
    .map_err(query_error)?;

    match row {
        Some(row) => {
            let conversation_row = ConversationRow::from_row(&row).map_err(query_error)?;
            Ok(Some(conversation_row.into_conversation()))
        }
        None => Ok(None),
    }
}

impl ConversationRepository for SqliteConversationRepository {
    async fn create_conversation(
        &self,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> Result<Conversation, RepositoryError> {
        let mut session = self.pool.session().await?;

        let result = sqlx::query(
            "INSERT INTO conversations (title, description, creator_id) VALUES (?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(creator_id.0)
        .execute(&mut *session)
        .await
        .map_err(query_error)?;

        let id = ConversationId(result.last_insert_rowid());
        tracing::debug!(conversation_id = %id, creator_id = %creator_id, "conversation created");

        fetch_conversation(&mut session, id).await?.ok_or_else(|| {
            RepositoryError::Query(format!("conversation {id} vanished after insert"))
        })
    }

    async fn read_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let mut session = self.pool.session().await?;
        fetch_conversation(&mut session, id).await
    }

    async fn read_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let mut session = self.pool.session().await?;

        let rows = sqlx::query("SELECT id, title, description, creator_id FROM conversations")
            .fetch_all(&mut *session)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                ConversationRow::from_row(row)
                    .map(ConversationRow::into_conversation)
                    .map_err(query_error)
            })
            .collect()
    }

    async fn update_conversation(
        &self,
        id: ConversationId,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let mut session = self.pool.session().await?;
        let mut tx = session.begin().await?;

        let result = sqlx::query(
            "UPDATE conversations SET title = ?, description = ?, creator_id = ? WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(creator_id.0)
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let conversation = fetch_conversation(&mut tx, id).await?;
        tx.commit().await.map_err(query_error)?;

        tracing::debug!(conversation_id = %id, "conversation updated");
        Ok(conversation)
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        let mut session = self.pool.session().await?;

        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id.0)
            .execute(&mut *session)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}

//! Conversation repository trait definition.

use polis_types::conversation::{Conversation, ConversationId};
use polis_types::error::RepositoryError;
use polis_types::user::UserId;

/// Repository trait for conversation persistence.
///
/// Same contract as [`super::user::UserRepository`]: absence is `None` or
/// `false`, never an error.
pub trait ConversationRepository: Send + Sync {
    fn create_conversation(
        &self,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    fn read_conversation(
        &self,
        id: ConversationId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    fn read_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Overwrite title, description and creator of an existing conversation.
    fn update_conversation(
        &self,
        id: ConversationId,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    fn delete_conversation(
        &self,
        id: ConversationId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

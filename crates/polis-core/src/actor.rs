//! Unified database actor.
//!
//! [`DatabaseActor`] owns one manager per entity type and implements every
//! repository port by forwarding to the manager that owns the operation. It
//! keeps no state of its own. Because each port's methods are named after
//! their entity, two ports exposing the same method name would be rejected at
//! the call site as ambiguous instead of one silently shadowing the other.

use polis_types::conversation::{Conversation, ConversationId};
use polis_types::error::RepositoryError;
use polis_types::user::{User, UserId};

use crate::repository::conversation::ConversationRepository;
use crate::repository::user::UserRepository;

/// Single access point over the user and conversation managers.
///
/// Generic over the repository traits so polis-core never depends on
/// polis-infra. The concrete SQLite pairing lives in
/// `polis_infra::actor::SqliteDatabaseActor`.
pub struct DatabaseActor<U: UserRepository, C: ConversationRepository> {
    users: U,
    conversations: C,
}

impl<U: UserRepository, C: ConversationRepository> DatabaseActor<U, C> {
    pub fn new(users: U, conversations: C) -> Self {
        Self {
            users,
            conversations,
        }
    }

    /// The user manager this actor forwards to.
    pub fn users(&self) -> &U {
        &self.users
    }

    /// The conversation manager this actor forwards to.
    pub fn conversations(&self) -> &C {
        &self.conversations
    }
}

impl<U: UserRepository, C: ConversationRepository> UserRepository for DatabaseActor<U, C> {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> Result<User, RepositoryError> {
        self.users.create_user(email, password, privilege).await
    }

    async fn read_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.users.read_user(id).await
    }

    async fn read_users(&self) -> Result<Vec<User>, RepositoryError> {
        self.users.read_users().await
    }

    async fn update_user(
        &self,
        id: UserId,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.users.update_user(id, email, password, privilege).await
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        self.users.delete_user(id).await
    }
}

impl<U: UserRepository, C: ConversationRepository> ConversationRepository
    for DatabaseActor<U, C>
{
    async fn create_conversation(
        &self,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> Result<Conversation, RepositoryError> {
        self.conversations
            .create_conversation(title, description, creator_id)
            .await
    }

    async fn read_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.conversations.read_conversation(id).await
    }

    async fn read_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        self.conversations.read_conversations().await
    }

    async fn update_conversation(
        &self,
        id: ConversationId,
        title: &str,
        description: &str,
        creator_id: UserId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.conversations
            .update_conversation(id, title, description, creator_id)
            .await
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        self.conversations.delete_conversation(id).await
    }
}

//! User repository trait definition.

use polis_types::error::RepositoryError;
use polis_types::user::{User, UserId};

/// Repository trait for user persistence.
///
/// Implementations live in polis-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id.
    fn create_user(
        &self,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Fetch a user by id. `None` if no such user exists.
    fn read_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Fetch every user, in storage order.
    fn read_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Overwrite every field of an existing user.
    ///
    /// Returns `None` without touching storage when the id is unknown.
    fn update_user(
        &self,
        id: UserId,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Permanently delete a user. `false` if there was nothing to delete.
    fn delete_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

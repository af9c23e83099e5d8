//! SQLite wiring for the unified database actor.

use polis_core::actor::DatabaseActor;
use polis_types::config::DatabaseConfig;
use polis_types::error::RepositoryError;

use crate::sqlite::conversation::SqliteConversationRepository;
use crate::sqlite::pool::DatabasePool;
use crate::sqlite::user::SqliteUserRepository;

/// `DatabaseActor` pinned to the SQLite managers.
pub type SqliteDatabaseActor = DatabaseActor<SqliteUserRepository, SqliteConversationRepository>;

/// Build an actor whose managers share `pool`.
pub fn actor_from_pool(pool: &DatabasePool) -> SqliteDatabaseActor {
    DatabaseActor::new(
        SqliteUserRepository::new(pool.clone()),
        SqliteConversationRepository::new(pool.clone()),
    )
}

/// Open the database, make sure the schema exists, and wire both managers.
pub async fn open_actor(config: &DatabaseConfig) -> Result<SqliteDatabaseActor, RepositoryError> {
    let pool = DatabasePool::connect(config).await?;
    Ok(actor_from_pool(&pool))
}

use thiserror::Error;

/// Errors from repository operations.
///
/// A missing record is never an error: lookups return `None` and deletes
/// return `false`. Everything here is a failure reported by the storage
/// engine, carried with the engine's own message.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("schema bootstrap error: {0}")]
    Bootstrap(String),
}

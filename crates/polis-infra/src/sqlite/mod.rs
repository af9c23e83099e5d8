//! SQLite storage layer.
//!
//! Entity managers backed by SQLite. Every operation borrows exactly one
//! [`pool::Session`] from the shared [`pool::DatabasePool`] and gives it back
//! before returning.

pub mod conversation;
pub mod pool;
pub mod user;

//! Shared domain types for Polis.
//!
//! This crate contains the records managed by the data-access layer (User,
//! Conversation), their identifiers, the repository error type, and the
//! database configuration.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod user;

//! Infrastructure layer for Polis.
//!
//! Contains the SQLite session provider, the SQLite implementations of the
//! repository traits defined in `polis-core`, configuration loading, and the
//! wiring that assembles them into a ready-to-use database actor.

pub mod actor;
pub mod config;
pub mod sqlite;

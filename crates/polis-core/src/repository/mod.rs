//! Repository trait definitions (ports).
//!
//! Each trait is the full CRUD surface for one record type. Method names are
//! qualified by the entity they act on so that several ports can be
//! implemented by one type without clashing.

pub mod conversation;
pub mod user;

//! Entity manager ports and the unified database actor for Polis.
//!
//! This crate defines the repository traits that the infrastructure layer
//! implements, plus [`actor::DatabaseActor`], which composes one manager per
//! entity into a single handle. It depends only on `polis-types` -- never on
//! `polis-infra` or any database crate.

pub mod actor;
pub mod repository;

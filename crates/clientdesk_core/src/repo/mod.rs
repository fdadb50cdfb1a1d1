//! Repository layer for client book persistence.
//!
//! # Responsibility
//! - Define the storage contract the dispatcher depends on.
//! - Isolate SQLite query details from command orchestration.
//!
//! # Invariants
//! - Repository APIs distinguish invalid persisted data from DB transport
//!   errors.

pub mod person_repo;

pub use person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};

//! Client book core for an insurance agent.
//! This crate is the single source of truth for client, policy and meeting
//! invariants; front ends only feed it command lines and render its views.

pub mod clock;
pub mod command;
pub mod config;
pub mod db;
pub mod index;
pub mod logging;
pub mod model;
pub mod parser;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Command, CommandError, CommandOutcome};
pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError};
pub use index::Index;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::fields::ValidationError;
pub use model::meeting::Meeting;
pub use model::person::{ClientStatus, Person, PersonIdentity};
pub use model::policy::{Policy, Premium, MAX_POLICIES};
pub use parser::{parse_command, ParseError};
pub use repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::{CommandDispatcher, DispatchError};
pub use store::registry::{ClientStatusSummary, PersonRegistry, RegistryError};
pub use store::session::Session;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

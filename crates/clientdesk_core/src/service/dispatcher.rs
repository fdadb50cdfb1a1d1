//! Parse, execute, persist loop over one session.
//!
//! # Responsibility
//! - Seed the session's first snapshot from the repository.
//! - Turn one input line into a command, run it, and persist the live person
//!   list whenever the command changed it.
//!
//! # Invariants
//! - Each line is fully parsed, executed, committed and persisted before the
//!   next one is accepted (`&mut self`).
//! - A failed save does not roll back the in-memory change; it is reported as
//!   `DispatchError::Storage` and retried on the next successful save.

use crate::clock::Clock;
use crate::command::{CommandError, CommandOutcome};
use crate::parser::{parse_command, ParseError};
use crate::repo::{PersonRepository, RepoError};
use crate::store::registry::RegistryError;
use crate::store::session::Session;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("could not save the client book: {0}")]
    Storage(#[source] RepoError),
    #[error("could not load the client book: {0}")]
    Load(#[source] RepoError),
    #[error("stored client book is inconsistent: {0}")]
    Inconsistent(#[source] RegistryError),
}

impl DispatchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(err) => err.code(),
            Self::Command(err) => err.code(),
            Self::Storage(_) => "storage_save_failed",
            Self::Load(_) => "storage_load_failed",
            Self::Inconsistent(_) => "storage_inconsistent",
        }
    }
}

/// Owns the session and its storage collaborator.
pub struct CommandDispatcher<R: PersonRepository> {
    session: Session,
    repo: R,
}

impl<R: PersonRepository> CommandDispatcher<R> {
    /// Loads the stored person list as history snapshot `S0`.
    pub fn new(repo: R) -> Result<Self, DispatchError> {
        let persons = repo.load_persons().map_err(DispatchError::Load)?;
        let session = Session::new(persons).map_err(DispatchError::Inconsistent)?;
        info!(
            "event=dispatcher_init module=service status=ok count={}",
            session.registry().len()
        );
        Ok(Self { session, repo })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.session = self.session.with_clock(clock);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Runs one command line.
    ///
    /// # Errors
    /// `Parse` and `Command` leave the session untouched. `Storage` means the
    /// command succeeded in memory but the save failed.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutcome, DispatchError> {
        let command = parse_command(line, self.session.now()).inspect_err(|err| {
            info!(
                "event=command_parse module=service status=rejected error_code={}",
                err.code()
            );
        })?;
        let outcome = command.execute(&mut self.session)?;

        if outcome.registry_changed {
            self.persist(command.keyword())?;
        }
        Ok(outcome)
    }

    /// Saves the live person list unconditionally. Called on shutdown so a
    /// save that failed earlier gets another chance.
    pub fn flush(&self) -> Result<(), DispatchError> {
        self.persist("flush")
    }

    fn persist(&self, keyword: &'static str) -> Result<(), DispatchError> {
        let started_at = Instant::now();
        self.repo
            .save_persons(self.session.registry().as_list())
            .map_err(|err| {
                error!(
                    "event=command_persist module=service status=error keyword={keyword} error_code=storage_save_failed duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                DispatchError::Storage(err)
            })
    }
}

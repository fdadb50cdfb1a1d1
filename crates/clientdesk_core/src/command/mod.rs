//! Executable client book commands.
//!
//! # Responsibility
//! - Validate semantic preconditions (indices, business rules) against the
//!   current session.
//! - Apply one all-or-nothing registry change and commit it.
//!
//! # Invariants
//! - A failing command never mutates the live registry or the history.
//! - Index arguments refer to the filtered view, not the full registry.
//! - Log lines carry the command keyword and error code, never field values.

mod history;
mod listing;
mod meeting;
mod person;
mod policy;

pub use history::{ClearCommand, RedoCommand, UndoCommand};
pub use listing::{FilterCommand, FindCommand, ListCommand};
pub use meeting::{MeetingChange, MeetingCommand, MeetingEdit, DEFAULT_MEETING_MINUTES};
pub use person::{AddCommand, DeleteCommand, EditCommand, EditPersonDescriptor};
pub use policy::{PolicyChange, PolicyCommand};

use crate::model::fields::ValidationError;
use crate::model::policy::MAX_POLICIES;
use crate::store::history::HistoryError;
use crate::store::registry::RegistryError;
use crate::store::session::Session;
use chrono::NaiveDateTime;
use log::{info, warn};
use thiserror::Error;

pub const HELP_MESSAGE: &str = "Commands:\n\
  add n/NAME p/PHONE e/EMAIL a/ADDRESS r/RELATIONSHIP [t/TAG]...\n\
  edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [r/RELATIONSHIP] [t/TAG]...\n\
  delete INDEX\n\
  policy INDEX [POLICY_INDEX] pol/DESCRIPTION [exp/YYYY-MM-DD] [pre/PREMIUM]\n\
  meeting INDEX [MEETING_INDEX] [d/DATE_OR_DAY tm/HH:MM] [dur/MINUTES] [ag/AGENDA] [no/NOTES]\n\
  find KEYWORD [MORE_KEYWORDS]...\n\
  filter [pol/KEYWORD]... [t/TAG]... [r/RELATIONSHIP]\n\
  list | clear | undo | redo | help | exit";

pub const MESSAGE_EXIT: &str = "Exiting client book as requested ...";
pub const MESSAGE_HELP: &str = "Showing help.";

/// Failure raised while executing a parsed command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("The person index provided is invalid")]
    InvalidPersonIndex,
    #[error("The policy index provided is invalid")]
    InvalidPolicyIndex,
    #[error("The meeting index provided is invalid")]
    InvalidMeetingIndex,
    #[error("Cannot have more than {} policies.", MAX_POLICIES)]
    TooManyPolicies,
    #[error("Policies can only be assigned to clients.")]
    NotAClient,
    #[error("This person already has a meeting at {}", .0.format("%Y-%m-%d %H:%M"))]
    DuplicateMeeting(NaiveDateTime),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CommandError {
    /// Stable machine-readable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPersonIndex => "invalid_person_index",
            Self::InvalidPolicyIndex => "invalid_policy_index",
            Self::InvalidMeetingIndex => "invalid_meeting_index",
            Self::TooManyPolicies => "too_many_policies",
            Self::NotAClient => "not_a_client",
            Self::DuplicateMeeting(_) => "duplicate_meeting",
            Self::Registry(RegistryError::DuplicatePerson) => "duplicate_person",
            Self::Registry(RegistryError::PersonNotFound) => "person_not_found",
            Self::History(HistoryError::NoUndoableState) => "no_undoable_state",
            Self::History(HistoryError::NoRedoableState) => "no_redoable_state",
            Self::Validation(_) => "validation",
        }
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Human-readable feedback for the display collaborator.
    pub feedback: String,
    /// True when the live registry differs from before the command.
    pub registry_changed: bool,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandOutcome {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            registry_changed: false,
            show_help: false,
            exit: false,
        }
    }

    pub fn changed(feedback: impl Into<String>, registry_changed: bool) -> Self {
        Self {
            registry_changed,
            ..Self::message(feedback)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(DeleteCommand),
    Policy(PolicyCommand),
    Meeting(MeetingCommand),
    Find(FindCommand),
    Filter(FilterCommand),
    List(ListCommand),
    Clear(ClearCommand),
    Undo(UndoCommand),
    Redo(RedoCommand),
    Help,
    Exit,
}

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add(_) => AddCommand::KEYWORD,
            Self::Edit(_) => EditCommand::KEYWORD,
            Self::Delete(_) => DeleteCommand::KEYWORD,
            Self::Policy(_) => PolicyCommand::KEYWORD,
            Self::Meeting(_) => MeetingCommand::KEYWORD,
            Self::Find(_) => FindCommand::KEYWORD,
            Self::Filter(_) => FilterCommand::KEYWORD,
            Self::List(_) => ListCommand::KEYWORD,
            Self::Clear(_) => ClearCommand::KEYWORD,
            Self::Undo(_) => UndoCommand::KEYWORD,
            Self::Redo(_) => RedoCommand::KEYWORD,
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Runs the command against `session`.
    ///
    /// # Errors
    /// Returns a typed `CommandError`; the session is unchanged on error.
    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        let result = match self {
            Self::Add(command) => command.execute(session),
            Self::Edit(command) => command.execute(session),
            Self::Delete(command) => command.execute(session),
            Self::Policy(command) => command.execute(session),
            Self::Meeting(command) => command.execute(session),
            Self::Find(command) => Ok(command.execute(session)),
            Self::Filter(command) => Ok(command.execute(session)),
            Self::List(command) => Ok(command.execute(session)),
            Self::Clear(command) => Ok(command.execute(session)),
            Self::Undo(command) => command.execute(session),
            Self::Redo(command) => command.execute(session),
            Self::Help => Ok(CommandOutcome {
                show_help: true,
                ..CommandOutcome::message(format!("{MESSAGE_HELP}\n{HELP_MESSAGE}"))
            }),
            Self::Exit => Ok(CommandOutcome {
                exit: true,
                ..CommandOutcome::message(MESSAGE_EXIT)
            }),
        };

        match &result {
            Ok(outcome) => info!(
                "event=command_execute module=command status=ok keyword={} changed={}",
                self.keyword(),
                outcome.registry_changed
            ),
            Err(err) => warn!(
                "event=command_execute module=command status=error keyword={} error_code={}",
                self.keyword(),
                err.code()
            ),
        }
        result
    }
}

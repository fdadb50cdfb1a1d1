//! Command-line text to `Command` conversion.
//!
//! # Responsibility
//! - Split input into keyword, preamble indices and prefixed options.
//! - Run syntax and local value validation before any command executes.
//!
//! # Invariants
//! - Parsing never reads or mutates the registry; bounds, existence and
//!   business rules are checked by commands.
//! - Relative dates resolve against the `now` passed in, never a hidden clock
//!   (except in `parse_local_date_time`).

mod commands;
pub mod datetime;
pub mod tokenizer;
pub mod values;

pub use commands::parse_arguments;
pub use datetime::{
    parse_date, parse_duration, parse_local_date_time, parse_time, parse_weekday,
    resolve_local_date_time, resolve_weekday,
};
pub use tokenizer::{tokenize, ArgumentMap, OptionKey};
pub use values::{
    parse_address, parse_email, parse_index, parse_name, parse_phone, parse_premium,
    parse_relationship, parse_tag, parse_tags,
};

use crate::command::{Command, HELP_MESSAGE};
use crate::model::fields::ValidationError;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Malformed input detected before any command runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command `{0}`. Type `help` to see available commands.")]
    UnknownCommand(String),
    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },
    #[error("Index is not a non-zero unsigned integer.")]
    InvalidIndex,
    #[error("{0}")]
    InvalidValue(#[from] ValidationError),
    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time `{0}`: expected 24-hour HH:MM")]
    InvalidTime(String),
    #[error("Invalid duration `{0}`: expected a non-negative number of minutes")]
    InvalidDuration(String),
    #[error("Unrecognised day `{0}`: expected a day of the week such as Wednesday")]
    InvalidDay(String),
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("At least one field to edit must be provided.")]
    NoFieldsToEdit,
    #[error("A meeting date (d/) and time (tm/) must be given together.")]
    IncompleteDateTime,
}

impl ParseError {
    /// Stable machine-readable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::InvalidIndex => "invalid_index",
            Self::InvalidValue(_) => "invalid_value",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidTime(_) => "invalid_time",
            Self::InvalidDuration(_) => "invalid_duration",
            Self::InvalidDay(_) => "invalid_day",
            Self::DuplicatePrefixes(_) => "duplicate_prefixes",
            Self::NoFieldsToEdit => "no_fields_to_edit",
            Self::IncompleteDateTime => "incomplete_date_time",
        }
    }
}

/// Parses one full command line, resolving relative dates against `now`.
pub fn parse_command(input: &str, now: NaiveDateTime) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: HELP_MESSAGE,
        });
    }
    let (keyword, args) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };
    parse_arguments(keyword, &tokenize(args), now)
}

//! Per-command argument parsers over a tokenized `ArgumentMap`.

use super::datetime::{parse_date, parse_duration, resolve_local_date_time};
use super::tokenizer::{ArgumentMap, OptionKey};
use super::values::{
    parse_address, parse_email, parse_index, parse_name, parse_phone, parse_premium,
    parse_relationship, parse_tags,
};
use super::ParseError;
use crate::command::{
    AddCommand, ClearCommand, Command, DeleteCommand, EditCommand, EditPersonDescriptor,
    FilterCommand, FindCommand, ListCommand, MeetingCommand, MeetingEdit, PolicyCommand,
    RedoCommand, UndoCommand, DEFAULT_MEETING_MINUTES,
};
use crate::index::Index;
use crate::model::fields::{Tag, ValidationError};
use crate::model::meeting::Meeting;
use crate::model::person::Person;
use crate::model::policy::Policy;
use crate::store::filter::FilterCriteria;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

const PERSON_FIELDS: [OptionKey; 5] = [
    OptionKey::Name,
    OptionKey::Phone,
    OptionKey::Email,
    OptionKey::Address,
    OptionKey::Relationship,
];
const POLICY_FIELDS: [OptionKey; 3] = [OptionKey::Policy, OptionKey::Expiry, OptionKey::Premium];
const MEETING_FIELDS: [OptionKey; 5] = [
    OptionKey::Date,
    OptionKey::Time,
    OptionKey::Duration,
    OptionKey::Agenda,
    OptionKey::Notes,
];

/// Builds the command named by `keyword` from tokenized arguments.
pub fn parse_arguments(
    keyword: &str,
    args: &ArgumentMap,
    now: NaiveDateTime,
) -> Result<Command, ParseError> {
    match keyword.to_ascii_lowercase().as_str() {
        AddCommand::KEYWORD => parse_add(args).map(Command::Add),
        EditCommand::KEYWORD => parse_edit(args).map(Command::Edit),
        DeleteCommand::KEYWORD => parse_delete(args).map(Command::Delete),
        PolicyCommand::KEYWORD => parse_policy(args).map(Command::Policy),
        MeetingCommand::KEYWORD => parse_meeting(args, now).map(Command::Meeting),
        FindCommand::KEYWORD => parse_find(args).map(Command::Find),
        FilterCommand::KEYWORD => parse_filter(args).map(Command::Filter),
        ListCommand::KEYWORD => Ok(Command::List(ListCommand)),
        ClearCommand::KEYWORD => Ok(Command::Clear(ClearCommand)),
        UndoCommand::KEYWORD => Ok(Command::Undo(UndoCommand)),
        RedoCommand::KEYWORD => Ok(Command::Redo(RedoCommand)),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand(keyword.to_string())),
    }
}

fn parse_add(args: &ArgumentMap) -> Result<AddCommand, ParseError> {
    let invalid = ParseError::InvalidFormat {
        usage: AddCommand::USAGE,
    };
    if !args.preamble().is_empty() || !PERSON_FIELDS.iter().all(|key| args.contains(*key)) {
        return Err(invalid);
    }
    args.verify_no_duplicates(&PERSON_FIELDS)?;

    let required = |key: OptionKey| args.value(key).unwrap_or_default();
    let person = Person::new(
        parse_name(required(OptionKey::Name))?,
        parse_phone(required(OptionKey::Phone))?,
        parse_email(required(OptionKey::Email))?,
        parse_address(required(OptionKey::Address))?,
        parse_relationship(required(OptionKey::Relationship))?,
        parse_tags(args.all_values(OptionKey::Tag))?,
    );
    Ok(AddCommand::new(person))
}

fn parse_edit(args: &ArgumentMap) -> Result<EditCommand, ParseError> {
    let index = parse_index(args.preamble()).map_err(|_| ParseError::InvalidFormat {
        usage: EditCommand::USAGE,
    })?;
    args.verify_no_duplicates(&PERSON_FIELDS)?;

    let descriptor = EditPersonDescriptor {
        name: args.value(OptionKey::Name).map(parse_name).transpose()?,
        phone: args.value(OptionKey::Phone).map(parse_phone).transpose()?,
        email: args.value(OptionKey::Email).map(parse_email).transpose()?,
        address: args.value(OptionKey::Address).map(parse_address).transpose()?,
        relationship: args
            .value(OptionKey::Relationship)
            .map(parse_relationship)
            .transpose()?,
        tags: parse_tags_for_edit(args)?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NoFieldsToEdit);
    }
    Ok(EditCommand::new(index, descriptor))
}

/// A single empty `t/` clears all tags.
fn parse_tags_for_edit(args: &ArgumentMap) -> Result<Option<BTreeSet<Tag>>, ParseError> {
    let values = args.all_values(OptionKey::Tag);
    match values.as_slice() {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        _ => parse_tags(values).map(Some),
    }
}

fn parse_delete(args: &ArgumentMap) -> Result<DeleteCommand, ParseError> {
    parse_index(args.preamble())
        .map(DeleteCommand::new)
        .map_err(|_| ParseError::InvalidFormat {
            usage: DeleteCommand::USAGE,
        })
}

/// Parses `INDEX [SUB_INDEX]` from the preamble.
fn parse_index_pair(preamble: &str, usage: &'static str) -> Result<(Index, Option<Index>), ParseError> {
    let invalid = || ParseError::InvalidFormat { usage };
    let parts: Vec<&str> = preamble.split_whitespace().collect();
    match parts.as_slice() {
        [person] => Ok((parse_index(person).map_err(|_| invalid())?, None)),
        [person, item] => Ok((
            parse_index(person).map_err(|_| invalid())?,
            Some(parse_index(item).map_err(|_| invalid())?),
        )),
        _ => Err(invalid()),
    }
}

fn parse_policy(args: &ArgumentMap) -> Result<PolicyCommand, ParseError> {
    let (person_index, policy_index) = parse_index_pair(args.preamble(), PolicyCommand::USAGE)?;
    let description = args.value(OptionKey::Policy).ok_or(ParseError::InvalidFormat {
        usage: PolicyCommand::USAGE,
    })?;
    args.verify_no_duplicates(&POLICY_FIELDS)?;

    if description.is_empty() {
        return match policy_index {
            Some(policy_index) => Ok(PolicyCommand::remove(person_index, policy_index)),
            None => Err(ValidationError::EmptyPolicyDescription.into()),
        };
    }

    let expiry = args.value(OptionKey::Expiry).map(parse_date).transpose()?;
    let premium = args.value(OptionKey::Premium).map(parse_premium).transpose()?;
    let policy = Policy::new(description, expiry, premium)?;
    Ok(match policy_index {
        Some(policy_index) => PolicyCommand::replace(person_index, policy_index, policy),
        None => PolicyCommand::add(person_index, policy),
    })
}

fn parse_meeting(args: &ArgumentMap, now: NaiveDateTime) -> Result<MeetingCommand, ParseError> {
    let (person_index, meeting_index) =
        parse_index_pair(args.preamble(), MeetingCommand::USAGE)?;
    args.verify_no_duplicates(&MEETING_FIELDS)?;

    let start = match (args.value(OptionKey::Date), args.value(OptionKey::Time)) {
        (Some(date), Some(time)) => Some(resolve_local_date_time(date, time, now)?),
        (None, None) => None,
        _ => return Err(ParseError::IncompleteDateTime),
    };
    let edit = MeetingEdit {
        start,
        duration_minutes: args.value(OptionKey::Duration).map(parse_duration).transpose()?,
        agenda: args.value(OptionKey::Agenda).map(str::to_string),
        notes: args.value(OptionKey::Notes).map(str::to_string),
    };

    match meeting_index {
        Some(meeting_index) if edit.is_empty() => {
            Ok(MeetingCommand::remove(person_index, meeting_index))
        }
        Some(meeting_index) => Ok(MeetingCommand::edit(person_index, meeting_index, edit)),
        None => {
            let start = edit.start.ok_or(ParseError::InvalidFormat {
                usage: MeetingCommand::USAGE,
            })?;
            let meeting = Meeting::new(
                start.date(),
                start.time(),
                edit.duration_minutes.unwrap_or(DEFAULT_MEETING_MINUTES),
                edit.agenda.unwrap_or_default(),
                edit.notes.unwrap_or_default(),
            );
            Ok(MeetingCommand::add(person_index, meeting))
        }
    }
}

fn parse_find(args: &ArgumentMap) -> Result<FindCommand, ParseError> {
    let keywords: Vec<String> = args
        .preamble()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if keywords.is_empty() || args.has_any(&OptionKey::ALL) {
        return Err(ParseError::InvalidFormat {
            usage: FindCommand::USAGE,
        });
    }
    Ok(FindCommand::new(keywords))
}

fn parse_filter(args: &ArgumentMap) -> Result<FilterCommand, ParseError> {
    let invalid = ParseError::InvalidFormat {
        usage: FilterCommand::USAGE,
    };
    if !args.preamble().is_empty() {
        return Err(invalid);
    }
    args.verify_no_duplicates(&[OptionKey::Relationship])?;

    let criteria = FilterCriteria {
        policy_keywords: args
            .all_values(OptionKey::Policy)
            .into_iter()
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        tags: parse_tags(args.all_values(OptionKey::Tag))?
            .into_iter()
            .collect(),
        relationship: args
            .value(OptionKey::Relationship)
            .map(parse_relationship)
            .transpose()?,
    };
    if criteria.is_empty() {
        return Err(invalid);
    }
    Ok(FilterCommand::new(criteria))
}

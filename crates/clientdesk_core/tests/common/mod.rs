#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use clientdesk_core::command::CommandOutcome;
use clientdesk_core::model::fields::{Address, Email, Name, Phone, Relationship, Tag};
use clientdesk_core::{
    parse_command, FixedClock, Meeting, Person, Policy, Session,
};
use std::sync::Arc;

/// Wednesday 2024-05-15 12:00.
pub fn fixed_now() -> NaiveDateTime {
    at(2024, 5, 15, 12, 0)
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn person(name: &str, phone: &str, relationship: &str, tags: &[&str]) -> Person {
    let local_part = name.split_whitespace().collect::<Vec<_>>().join(".").to_lowercase();
    let email = format!("{local_part}@example.com");
    Person::new(
        Name::parse(name).unwrap(),
        Phone::parse(phone).unwrap(),
        Email::parse(&email).unwrap(),
        Address::parse("123, Jurong West Ave 6, #08-111").unwrap(),
        Relationship::parse(relationship).unwrap(),
        tags.iter().map(|tag| Tag::parse(tag).unwrap()),
    )
}

pub fn with_meeting(person: Person, start: NaiveDateTime) -> Person {
    let mut meetings = person.meetings().to_vec();
    meetings.push(Meeting::at(start, 60));
    person.with_meetings(meetings)
}

pub fn with_policies(person: Person, descriptions: &[&str]) -> Person {
    let policies = descriptions
        .iter()
        .map(|description| Policy::named(description).unwrap())
        .collect();
    person.with_policies(policies).unwrap()
}

pub fn alice() -> Person {
    person("Alice Pauline", "94351253", "client", &["friends"])
}

pub fn benson() -> Person {
    person("Benson Meier", "98765432", "lead", &["owesMoney", "friends"])
}

pub fn carl() -> Person {
    person("Carl Kurz", "95352563", "client", &[])
}

pub fn daniel() -> Person {
    person("Daniel Meier", "87652533", "friend", &["friends"])
}

pub fn typical_persons() -> Vec<Person> {
    vec![alice(), benson(), carl(), daniel()]
}

pub fn session_with(persons: Vec<Person>) -> Session {
    Session::new(persons)
        .unwrap()
        .with_clock(Arc::new(FixedClock(fixed_now())))
}

/// Parses and executes `line`, panicking on any failure.
pub fn run(session: &mut Session, line: &str) -> CommandOutcome {
    parse_command(line, session.now())
        .unwrap_or_else(|err| panic!("`{line}` failed to parse: {err}"))
        .execute(session)
        .unwrap_or_else(|err| panic!("`{line}` failed: {err}"))
}

pub fn names(session: &Session) -> Vec<String> {
    session
        .filtered_persons()
        .iter()
        .map(|person| person.name().to_string())
        .collect()
}

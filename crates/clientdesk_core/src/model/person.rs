//! Person aggregate and derived client status.
//!
//! # Responsibility
//! - Own a person's contact fields, tags, policies and meetings.
//! - Expose the identity key used for uniqueness checks.
//!
//! # Invariants
//! - `policies.len() <= MAX_POLICIES`.
//! - `meetings` are kept sorted by start ascending (stable for ties).
//! - Values are never mutated in place; `with_*` helpers return new persons.

use super::fields::{Address, Email, Name, Phone, Relationship, Tag, ValidationError};
use super::meeting::Meeting;
use super::policy::{Policy, MAX_POLICIES};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Comparable identity tuple `(name, phone, email)`.
///
/// Two persons with equal identities are considered the same person even if
/// other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonIdentity {
    name: String,
    phone: String,
    email: String,
}

/// Coverage classification derived from relationship and policy count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    NotClient,
    NoPolicies,
    Active,
    FullyCovered,
}

impl ClientStatus {
    /// Severity level shown next to a client: 1 (no cover) to 3 (full cover).
    pub fn level(self) -> u8 {
        match self {
            Self::NotClient => 0,
            Self::NoPolicies => 1,
            Self::Active => 2,
            Self::FullyCovered => 3,
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotClient => "Not a client",
            Self::NoPolicies => "No policies",
            Self::Active => "Active",
            Self::FullyCovered => "Fully covered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersonRecord")]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    relationship: Relationship,
    tags: BTreeSet<Tag>,
    policies: Vec<Policy>,
    meetings: Vec<Meeting>,
}

/// Unvalidated wire shape; converted through `Person::try_from`.
#[derive(Deserialize)]
struct PersonRecord {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    relationship: Relationship,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default)]
    policies: Vec<Policy>,
    #[serde(default)]
    meetings: Vec<Meeting>,
}

impl TryFrom<PersonRecord> for Person {
    type Error = ValidationError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        Person::new(
            record.name,
            record.phone,
            record.email,
            record.address,
            record.relationship,
            record.tags,
        )
        .with_policies(record.policies)
        .map(|person| person.with_meetings(record.meetings))
    }
}

impl Person {
    /// Creates a person without policies or meetings.
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        relationship: Relationship,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            relationship,
            tags: tags.into_iter().collect(),
            policies: Vec::new(),
            meetings: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Tags in sorted order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn identity(&self) -> PersonIdentity {
        PersonIdentity {
            name: self.name.identity_key(),
            phone: self.phone.as_str().to_string(),
            email: self.email.identity_key(),
        }
    }

    /// Identity comparison, weaker than `==`.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.identity() == other.identity()
    }

    pub fn is_client(&self) -> bool {
        self.relationship.is_client()
    }

    pub fn client_status(&self) -> ClientStatus {
        if !self.is_client() {
            return ClientStatus::NotClient;
        }
        match self.policies.len() {
            0 => ClientStatus::NoPolicies,
            count if count >= MAX_POLICIES => ClientStatus::FullyCovered,
            _ => ClientStatus::Active,
        }
    }

    /// Meeting with the smallest start date-time, if any.
    pub fn earliest_meeting(&self) -> Option<&Meeting> {
        self.meetings.first()
    }

    pub fn earliest_meeting_start(&self) -> Option<NaiveDateTime> {
        self.earliest_meeting().map(Meeting::start)
    }

    pub fn has_meeting_at(&self, start: NaiveDateTime) -> bool {
        self.meetings.iter().any(|meeting| meeting.start() == start)
    }

    pub fn with_name(&self, name: Name) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub fn with_phone(&self, phone: Phone) -> Self {
        Self {
            phone,
            ..self.clone()
        }
    }

    pub fn with_email(&self, email: Email) -> Self {
        Self {
            email,
            ..self.clone()
        }
    }

    pub fn with_address(&self, address: Address) -> Self {
        Self {
            address,
            ..self.clone()
        }
    }

    pub fn with_relationship(&self, relationship: Relationship) -> Self {
        Self {
            relationship,
            ..self.clone()
        }
    }

    pub fn with_tags(&self, tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Returns a copy holding `policies`.
    ///
    /// # Errors
    /// - `ValidationError::TooManyPolicies` above `MAX_POLICIES`.
    /// - `ValidationError::EmptyPolicyDescription` for a blank policy.
    pub fn with_policies(&self, policies: Vec<Policy>) -> Result<Self, ValidationError> {
        if policies.len() > MAX_POLICIES {
            return Err(ValidationError::TooManyPolicies { max: MAX_POLICIES });
        }
        for policy in &policies {
            policy.validate()?;
        }
        Ok(Self {
            policies,
            ..self.clone()
        })
    }

    /// Returns a copy holding `meetings`, sorted by start.
    pub fn with_meetings(&self, mut meetings: Vec<Meeting>) -> Self {
        meetings.sort_by_key(Meeting::start);
        Self {
            meetings,
            ..self.clone()
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Relationship: {}; Tags: ",
            self.name, self.phone, self.email, self.address, self.relationship
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}

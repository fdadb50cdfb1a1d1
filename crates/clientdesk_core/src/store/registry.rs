//! Unique person registry.
//!
//! # Responsibility
//! - Own the live ordered list of persons.
//! - Reject identity collisions on every write path.
//!
//! # Invariants
//! - No two entries share a `PersonIdentity`.
//! - Entries are sorted by earliest meeting start, persons without meetings
//!   last, stable for ties.
//! - `set_person` re-sorts only when the meeting lists differ.

use crate::model::person::{ClientStatus, Person};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("This person already exists in the client book")]
    DuplicatePerson,
    #[error("The person could not be found in the client book")]
    PersonNotFound,
}

/// Number of persons in each client-status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientStatusSummary {
    pub not_client: usize,
    pub no_policies: usize,
    pub active: usize,
    pub fully_covered: usize,
}

/// Ordered, identity-unique collection of persons.
///
/// Persons are shared behind `Arc`, so cloning a registry for a history
/// snapshot copies pointers rather than person data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRegistry {
    persons: Vec<Arc<Person>>,
}

impl PersonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `persons`, sorting once.
    pub fn from_persons(persons: Vec<Person>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.replace_all(persons)?;
        Ok(registry)
    }

    pub fn contains(&self, person: &Person) -> bool {
        let identity = person.identity();
        self.persons
            .iter()
            .any(|existing| existing.identity() == identity)
    }

    pub fn add(&mut self, person: Person) -> Result<(), RegistryError> {
        if self.contains(&person) {
            return Err(RegistryError::DuplicatePerson);
        }
        self.persons.push(Arc::new(person));
        self.sort_by_earliest_meeting();
        Ok(())
    }

    /// Replaces `target` with `replacement` at the same position.
    pub fn set_person(&mut self, target: &Person, replacement: Person) -> Result<(), RegistryError> {
        let position = self
            .position_of(target)
            .ok_or(RegistryError::PersonNotFound)?;

        if !target.is_same_person(&replacement) && self.contains(&replacement) {
            return Err(RegistryError::DuplicatePerson);
        }

        let meetings_changed = target.meetings() != replacement.meetings();
        self.persons[position] = Arc::new(replacement);
        if meetings_changed {
            self.sort_by_earliest_meeting();
        }
        Ok(())
    }

    pub fn remove(&mut self, target: &Person) -> Result<(), RegistryError> {
        let position = self
            .position_of(target)
            .ok_or(RegistryError::PersonNotFound)?;
        self.persons.remove(position);
        Ok(())
    }

    /// Bulk reset used on load and clear.
    ///
    /// The registry is left untouched when `persons` contains duplicates.
    pub fn replace_all(&mut self, persons: Vec<Person>) -> Result<(), RegistryError> {
        let mut seen = HashSet::with_capacity(persons.len());
        if !persons.iter().all(|person| seen.insert(person.identity())) {
            return Err(RegistryError::DuplicatePerson);
        }
        self.persons = persons.into_iter().map(Arc::new).collect();
        self.sort_by_earliest_meeting();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.persons.clear();
    }

    pub fn as_list(&self) -> &[Arc<Person>] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn client_status_summary(&self) -> ClientStatusSummary {
        let mut summary = ClientStatusSummary::default();
        for person in &self.persons {
            match person.client_status() {
                ClientStatus::NotClient => summary.not_client += 1,
                ClientStatus::NoPolicies => summary.no_policies += 1,
                ClientStatus::Active => summary.active += 1,
                ClientStatus::FullyCovered => summary.fully_covered += 1,
            }
        }
        summary
    }

    fn position_of(&self, target: &Person) -> Option<usize> {
        self.persons
            .iter()
            .position(|existing| existing.as_ref() == target)
    }

    fn sort_by_earliest_meeting(&mut self) {
        self.persons.sort_by_key(|person| {
            let start = person.earliest_meeting_start();
            (start.is_none(), start)
        });
    }
}

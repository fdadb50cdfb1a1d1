//! Person create/edit/delete commands.

use super::{CommandError, CommandOutcome};
use crate::index::Index;
use crate::model::fields::{Address, Email, Name, Phone, Relationship, Tag};
use crate::model::person::Person;
use crate::store::session::Session;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    person: Person,
}

impl AddCommand {
    pub const KEYWORD: &'static str = "add";
    pub const USAGE: &'static str = "add: Adds a person to the client book. Parameters: \
n/NAME p/PHONE e/EMAIL a/ADDRESS r/RELATIONSHIP [t/TAG]...\n\
Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 r/client t/friends";

    pub fn new(person: Person) -> Self {
        Self { person }
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        session
            .store_mut()
            .registry_mut()
            .add(self.person.clone())?;
        let changed = session.store_mut().commit();
        session.show_all();
        Ok(CommandOutcome::changed(
            format!("New person added: {}", self.person),
            changed,
        ))
    }
}

/// Fields to overwrite on an existing person; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub relationship: Option<Relationship>,
    /// `Some(empty)` clears all tags.
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.relationship.is_some()
            || self.tags.is_some()
    }

    /// Builds the edited copy; policies and meetings carry over unchanged.
    pub fn apply(&self, person: &Person) -> Person {
        let mut edited = person.clone();
        if let Some(name) = &self.name {
            edited = edited.with_name(name.clone());
        }
        if let Some(phone) = &self.phone {
            edited = edited.with_phone(phone.clone());
        }
        if let Some(email) = &self.email {
            edited = edited.with_email(email.clone());
        }
        if let Some(address) = &self.address {
            edited = edited.with_address(address.clone());
        }
        if let Some(relationship) = &self.relationship {
            edited = edited.with_relationship(relationship.clone());
        }
        if let Some(tags) = &self.tags {
            edited = edited.with_tags(tags.iter().cloned());
        }
        edited
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditPersonDescriptor,
}

impl EditCommand {
    pub const KEYWORD: &'static str = "edit";
    pub const USAGE: &'static str = "edit: Edits the details of the person identified by the \
index number used in the displayed person list. Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [r/RELATIONSHIP] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

    pub fn new(index: Index, descriptor: EditPersonDescriptor) -> Self {
        Self { index, descriptor }
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        let target = session
            .person_at(self.index)
            .ok_or(CommandError::InvalidPersonIndex)?;
        let edited = self.descriptor.apply(&target);

        session
            .store_mut()
            .registry_mut()
            .set_person(&target, edited.clone())?;
        let changed = session.store_mut().commit();
        session.show_all();
        Ok(CommandOutcome::changed(
            format!("Edited Person: {edited}"),
            changed,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub const KEYWORD: &'static str = "delete";
    pub const USAGE: &'static str = "delete: Deletes the person identified by the index number \
used in the displayed person list.\nParameters: INDEX (must be a positive integer)\nExample: delete 1";

    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        let target = session
            .person_at(self.index)
            .ok_or(CommandError::InvalidPersonIndex)?;
        session.store_mut().registry_mut().remove(&target)?;
        let changed = session.store_mut().commit();
        Ok(CommandOutcome::changed(
            format!("Deleted Person: {target}"),
            changed,
        ))
    }
}

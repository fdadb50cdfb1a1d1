//! Person list repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Seed the initial registry snapshot from storage.
//! - Persist the live person list after every committed change.
//!
//! # Invariants
//! - Saves replace the whole table in one transaction; readers never observe
//!   a half-written list.
//! - Read paths re-validate every row and reject invalid persisted state
//!   instead of masking it.
//! - Rows are returned in stored `position` order.

use crate::db::DbError;
use crate::model::fields::{Address, Email, Name, Phone, Relationship, Tag, ValidationError};
use crate::model::meeting::Meeting;
use crate::model::person::Person;
use crate::model::policy::Policy;
use log::{error, info};
use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

const PERSON_SELECT_SQL: &str = "SELECT
    position,
    name,
    phone,
    email,
    address,
    relationship,
    tags_json,
    policies_json,
    meetings_json
FROM persons
ORDER BY position ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted person data at position {position}: {message}")]
    InvalidData { position: i64, message: String },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage collaborator for the person list.
pub trait PersonRepository {
    fn load_persons(&self) -> RepoResult<Vec<Person>>;
    fn save_persons(&self, persons: &[Arc<Person>]) -> RepoResult<()>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn load_persons(&self) -> RepoResult<Vec<Person>> {
        let started_at = Instant::now();
        let mut stmt = self.conn.prepare(PERSON_SELECT_SQL)?;
        let mut rows = stmt.query([])?;

        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            match parse_person_row(row) {
                Ok(person) => persons.push(person),
                Err(err) => {
                    error!(
                        "event=persons_load module=repo status=error error_code=invalid_data duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    return Err(err);
                }
            }
        }

        info!(
            "event=persons_load module=repo status=ok count={} duration_ms={}",
            persons.len(),
            started_at.elapsed().as_millis()
        );
        Ok(persons)
    }

    fn save_persons(&self, persons: &[Arc<Person>]) -> RepoResult<()> {
        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM persons;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO persons (
                    position,
                    name,
                    phone,
                    email,
                    address,
                    relationship,
                    tags_json,
                    policies_json,
                    meetings_json
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for (position, person) in persons.iter().enumerate() {
                let position = position_to_db(position)?;
                insert.execute(params![
                    position,
                    person.name().as_str(),
                    person.phone().as_str(),
                    person.email().as_str(),
                    person.address().as_str(),
                    person.relationship().as_str(),
                    to_json(position, person.tags())?,
                    to_json(position, person.policies())?,
                    to_json(position, person.meetings())?,
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=persons_save module=repo status=ok count={} duration_ms={}",
            persons.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let position: i64 = row.get(0)?;
    let invalid = |err: ValidationError| RepoError::InvalidData {
        position,
        message: err.to_string(),
    };

    let name = Name::parse(&row.get::<_, String>(1)?).map_err(invalid)?;
    let phone = Phone::parse(&row.get::<_, String>(2)?).map_err(invalid)?;
    let email = Email::parse(&row.get::<_, String>(3)?).map_err(invalid)?;
    let address = Address::parse(&row.get::<_, String>(4)?).map_err(invalid)?;
    let relationship = Relationship::parse(&row.get::<_, String>(5)?).map_err(invalid)?;
    let tags: BTreeSet<Tag> = from_json(position, &row.get::<_, String>(6)?)?;
    let policies: Vec<Policy> = from_json(position, &row.get::<_, String>(7)?)?;
    let meetings: Vec<Meeting> = from_json(position, &row.get::<_, String>(8)?)?;

    Person::new(name, phone, email, address, relationship, tags)
        .with_policies(policies)
        .map(|person| person.with_meetings(meetings))
        .map_err(invalid)
}

fn from_json<T: DeserializeOwned>(position: i64, raw: &str) -> RepoResult<T> {
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData {
        position,
        message: err.to_string(),
    })
}

fn to_json<T: serde::Serialize + ?Sized>(position: i64, value: &T) -> RepoResult<String> {
    serde_json::to_string(value).map_err(|err| RepoError::InvalidData {
        position,
        message: err.to_string(),
    })
}

fn position_to_db(position: usize) -> RepoResult<i64> {
    i64::try_from(position).map_err(|_| RepoError::InvalidData {
        position: i64::MAX,
        message: "position out of range".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{PersonRepository, RepoError, SqlitePersonRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn empty_database_loads_no_persons() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePersonRepository::new(&conn);
        assert!(repo.load_persons().unwrap().is_empty());
    }

    #[test]
    fn invalid_row_is_rejected_on_load() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO persons (position, name, phone, email, address, relationship)
             VALUES (0, 'Amy Bee', 'abc', 'amy@example.com', 'Jurong', 'client');",
            [],
        )
        .unwrap();
        let repo = SqlitePersonRepository::new(&conn);
        assert!(matches!(
            repo.load_persons(),
            Err(RepoError::InvalidData { position: 0, .. })
        ));
    }

    #[test]
    fn malformed_json_column_is_rejected_on_load() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO persons (position, name, phone, email, address, relationship, tags_json)
             VALUES (0, 'Amy Bee', '11111111', 'amy@example.com', 'Jurong', 'client', 'not json');",
            [],
        )
        .unwrap();
        let repo = SqlitePersonRepository::new(&conn);
        assert!(matches!(
            repo.load_persons(),
            Err(RepoError::InvalidData { .. })
        ));
    }
}

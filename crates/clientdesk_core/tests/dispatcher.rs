mod common;

use clientdesk_core::command::CommandError;
use clientdesk_core::db::DbError;
use clientdesk_core::{
    open_db_in_memory, CommandDispatcher, DispatchError, FixedClock, ParseError, Person,
    PersonRepository, RepoError, RepoResult, SqlitePersonRepository,
};
use common::{alice, benson, fixed_now};
use std::cell::Cell;
use std::sync::Arc;

const ADD_AMY: &str = "add n/Amy Bee p/11111111 e/amy@example.com a/Jurong r/client";

#[test]
fn successful_changes_are_persisted() {
    let conn = open_db_in_memory().unwrap();
    let mut dispatcher = CommandDispatcher::new(SqlitePersonRepository::new(&conn)).unwrap();

    dispatcher.execute(ADD_AMY).unwrap();
    dispatcher.execute("policy 1 pol/Life").unwrap();

    let stored = SqlitePersonRepository::new(&conn).load_persons().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].policies().len(), 1);

    dispatcher.execute("undo").unwrap();
    let stored = SqlitePersonRepository::new(&conn).load_persons().unwrap();
    assert!(stored[0].policies().is_empty());
}

#[test]
fn stored_persons_seed_the_first_snapshot() {
    let conn = open_db_in_memory().unwrap();
    SqlitePersonRepository::new(&conn)
        .save_persons(&[Arc::new(alice()), Arc::new(benson())])
        .unwrap();

    let mut dispatcher = CommandDispatcher::new(SqlitePersonRepository::new(&conn)).unwrap();
    assert_eq!(dispatcher.session().registry().len(), 2);
    assert!(matches!(
        dispatcher.execute("undo"),
        Err(DispatchError::Command(CommandError::History(_)))
    ));
}

#[test]
fn parse_and_command_errors_are_distinguished() {
    let conn = open_db_in_memory().unwrap();
    let mut dispatcher = CommandDispatcher::new(SqlitePersonRepository::new(&conn))
        .unwrap()
        .with_clock(Arc::new(FixedClock(fixed_now())));

    let err = dispatcher.execute("delete x").unwrap_err();
    assert!(matches!(err, DispatchError::Parse(ParseError::InvalidFormat { .. })));
    assert_eq!(err.code(), "invalid_format");

    let err = dispatcher.execute("delete 1").unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Command(CommandError::InvalidPersonIndex)
    ));
    assert_eq!(err.to_string(), "The person index provided is invalid");
}

#[test]
fn relative_meeting_days_use_the_injected_clock() {
    let conn = open_db_in_memory().unwrap();
    let mut dispatcher = CommandDispatcher::new(SqlitePersonRepository::new(&conn))
        .unwrap()
        .with_clock(Arc::new(FixedClock(fixed_now())));

    dispatcher.execute(ADD_AMY).unwrap();
    dispatcher.execute("meeting 1 d/Monday tm/10:00").unwrap();

    let person = &dispatcher.session().registry().as_list()[0];
    assert_eq!(person.meetings()[0].start(), common::at(2024, 5, 20, 10, 0));
}

/// Loads nothing and fails every save after the first `allowed` ones.
struct FlakyRepository {
    allowed: Cell<usize>,
}

impl PersonRepository for FlakyRepository {
    fn load_persons(&self) -> RepoResult<Vec<Person>> {
        Ok(Vec::new())
    }

    fn save_persons(&self, _persons: &[Arc<Person>]) -> RepoResult<()> {
        match self.allowed.get() {
            0 => Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
                db_version: 99,
                latest_supported: 1,
            })),
            remaining => {
                self.allowed.set(remaining - 1);
                Ok(())
            }
        }
    }
}

#[test]
fn storage_failure_keeps_the_in_memory_change() {
    let mut dispatcher = CommandDispatcher::new(FlakyRepository {
        allowed: Cell::new(0),
    })
    .unwrap();

    let err = dispatcher.execute(ADD_AMY).unwrap_err();
    assert!(matches!(err, DispatchError::Storage(_)));
    assert_eq!(err.code(), "storage_save_failed");
    assert_eq!(dispatcher.session().registry().len(), 1);
    assert!(dispatcher.session().store().can_undo());

    dispatcher.repository().allowed.set(1);
    dispatcher.flush().unwrap();
}

#[test]
fn view_commands_do_not_save() {
    let mut dispatcher = CommandDispatcher::new(FlakyRepository {
        allowed: Cell::new(0),
    })
    .unwrap();
    for line in ["list", "find amy", "help"] {
        assert!(dispatcher.execute(line).is_ok(), "`{line}` tried to save");
    }
}

#[test]
fn duplicate_rows_in_storage_are_rejected_at_startup() {
    struct Duplicated;
    impl PersonRepository for Duplicated {
        fn load_persons(&self) -> RepoResult<Vec<Person>> {
            Ok(vec![alice(), alice()])
        }
        fn save_persons(&self, _persons: &[Arc<Person>]) -> RepoResult<()> {
            Ok(())
        }
    }

    assert!(matches!(
        CommandDispatcher::new(Duplicated),
        Err(DispatchError::Inconsistent(_))
    ));
}

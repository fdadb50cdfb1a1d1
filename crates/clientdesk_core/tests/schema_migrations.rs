use clientdesk_core::db::migrations::latest_version;
use clientdesk_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
        [kind, name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}

#[test]
fn fresh_database_has_persons_table_and_identity_index() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert!(schema_object_exists(&conn, "table", "persons"));
    assert!(schema_object_exists(&conn, "index", "idx_persons_identity"));
}

#[test]
fn identity_index_rejects_case_variant_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let insert = "INSERT INTO persons (position, name, phone, email, address, relationship)
                  VALUES (?1, ?2, '11111111', ?3, 'Jurong', 'client');";
    conn.execute(insert, rusqlite::params![0, "Amy Bee", "amy@example.com"])
        .unwrap();
    assert!(conn
        .execute(insert, rusqlite::params![1, "AMY BEE", "Amy@Example.com"])
        .is_err());
}

#[test]
fn reopening_a_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clientdesk.db");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

use rusqlite::Connection;
use shelftrack_core::db::migrations::{latest_version, verify_inventory_layout};
use shelftrack_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "author");
    assert_table_exists(&conn, "book");
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();

    let err = conn
        .execute(
            "INSERT INTO book (id, title, authorID, quantity) VALUES (3999, 'Orphan', 1111, 1);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"), "unexpected error: {err}");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute_batch(
            "INSERT INTO author (ID, Name, Country) VALUES (1111, 'Kept', 'Here');",
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let kept: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM author WHERE ID = 1111;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(kept, 1);
}

#[test]
fn existing_unversioned_database_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE author (ID INTEGER PRIMARY KEY NOT NULL, Name TEXT, Country TEXT);
             CREATE TABLE book (
                id INTEGER PRIMARY KEY NOT NULL,
                title TEXT,
                authorID INTEGER,
                quantity INTEGER,
                FOREIGN KEY (authorID) REFERENCES author(ID)
             );
             INSERT INTO author VALUES (1290, 'Charles Dickens', 'England');
             INSERT INTO book VALUES (3001, 'A Tale Of Two Cities', 1290, 30);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let title: String = conn
        .query_row("SELECT title FROM book WHERE id = 3001;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "A Tale Of Two Cities");
}

#[test]
fn existing_table_with_foreign_layout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.db");

    let other = Connection::open(&path).unwrap();
    other
        .execute_batch(
            "CREATE TABLE book (id INTEGER PRIMARY KEY, title TEXT, authorID INTEGER, isbn TEXT);",
        )
        .unwrap();
    drop(other);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::IncompatibleTable {
            table,
            missing_column,
        } => {
            assert_eq!(table, "book");
            assert_eq!(missing_column, "quantity");
        }
        other => panic!("unexpected error: {other}"),
    }

    let untouched = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&untouched), 0, "failed migration must roll back");
}

#[test]
fn column_check_runs_on_already_migrated_databases() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "DROP TABLE book;
         CREATE TABLE book (id INTEGER PRIMARY KEY, title TEXT, authorID INTEGER);",
    )
    .unwrap();

    let err = verify_inventory_layout(&conn).unwrap_err();
    assert!(err.to_string().contains("missing column `quantity`"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

use rusqlite::Connection;
use todo_core::db::migrations::latest_version;
use todo_core::db::{open_db, open_db_in_memory, DbError, DbHandle};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "tasks");
    assert_index_exists(&conn, "idx_tasks_created_at");
    assert_index_exists(&conn, "idx_tasks_completed");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "tasks");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

#[test]
fn schema_rejects_blank_text_and_reversed_timestamps() {
    let conn = open_db_in_memory().unwrap();

    let blank = conn.execute(
        "INSERT INTO tasks (text, completed, created_at, updated_at) VALUES ('  ', 0, 1, 1);",
        [],
    );
    assert!(blank.is_err());

    let reversed = conn.execute(
        "INSERT INTO tasks (text, completed, created_at, updated_at) VALUES ('x', 0, 5, 4);",
        [],
    );
    assert!(reversed.is_err());
}

#[test]
fn handle_failure_is_reported_and_handle_stays_unopened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-parent").join("todo.sqlite3");

    let handle = DbHandle::file(&path);
    assert!(handle.connection().is_err());
    assert!(!handle.is_open());

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    handle.connection().unwrap();
    assert!(handle.is_open());
    handle.close().unwrap();
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_schema_object(conn, "table", table_name);
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert_schema_object(conn, "index", index_name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}

use cinedex_db::open_database;
use cinedex_db::open_memory;
use cinedex_db::schema::{CURRENT_VERSION, create_schema, get_schema_version};
use tempfile::TempDir;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    create_schema(&conn).unwrap();

    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = ["schema_version", "people", "films", "cast_members"];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn open_database_creates_then_reopens() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO people (name) VALUES ('Agnès Varda')",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let name: String = conn
        .query_row("SELECT name FROM people", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Agnès Varda");
}

#[test]
fn newer_schema_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("future.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    assert!(open_database(&path).is_err());
}

#[test]
fn bare_database_reports_version_zero() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 0);
}

#[test]
fn file_database_enforces_foreign_keys() {
    let tmp = TempDir::new().unwrap();
    let conn = open_database(&tmp.path().join("catalog.db")).unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);

    let err = conn.execute(
        "INSERT INTO cast_members (film_id, person_id) VALUES (41, 42)",
        [],
    );
    assert!(err.is_err());
}

//! SQLite schema creation and versioning.

use std::path::Path;

use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![CURRENT_VERSION],
        )?;
    }
    Ok(())
}

/// Open or create a catalog database at the given path.
///
/// Each caller gets its own connection; it is closed when dropped.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(&format!(
        "PRAGMA journal_mode=WAL; {CONNECTION_PRAGMAS} PRAGMA busy_timeout={BUSY_TIMEOUT_MS};"
    ))?;

    match get_schema_version(&conn)? {
        found if found > CURRENT_VERSION => Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found,
        }),
        CURRENT_VERSION => Ok(conn),
        _ => {
            log::debug!("Creating catalog schema at {}", path.display());
            create_schema(&conn)?;
            Ok(conn)
        }
    }
}

/// In-memory catalog with the full schema, for tests.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(CONNECTION_PRAGMAS)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Highest recorded schema version; 0 for a database without the catalog schema.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let has_table = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'")?
        .exists([])?;
    if !has_table {
        return Ok(0);
    }
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

// Cascades in SCHEMA_SQL only fire with foreign keys on, for every connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys=ON;";

// Deleting a person clears the director link and drops their cast rows.
// Cast rows carry no uniqueness constraint: a person may be linked twice.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    birthdate TEXT
);
CREATE INDEX IF NOT EXISTS idx_people_name ON people(name);

CREATE TABLE IF NOT EXISTS films (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    duration INTEGER,
    director_id INTEGER REFERENCES people(id) ON DELETE SET NULL
);
CREATE INDEX IF NOT EXISTS idx_films_year ON films(year);
CREATE INDEX IF NOT EXISTS idx_films_title ON films(title);
CREATE INDEX IF NOT EXISTS idx_films_director ON films(director_id);

CREATE TABLE IF NOT EXISTS cast_members (
    film_id INTEGER NOT NULL REFERENCES films(id) ON DELETE CASCADE,
    person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_cast_film ON cast_members(film_id);
CREATE INDEX IF NOT EXISTS idx_cast_person ON cast_members(person_id);
"#;

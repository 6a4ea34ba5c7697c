//! Entity store: get, list, create, update, delete and count for films and people.
//!
//! Every operation takes the caller's connection. A missing id is reported as
//! `Ok(None)`; only SQLite failures surface as errors.

use cinedex_catalog::types::{Film, NewFilm, NewPerson, Person};
use rusqlite::{Connection, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{table} row {id} was not found after insert")]
    Vanished { table: &'static str, id: i64 },
}

/// A persisted entity kind with a store-generated integer id.
pub trait Record: Sized {
    /// Creation payload (all scalar fields, no id).
    type Draft;

    const TABLE: &'static str;
    /// Column list in the order `from_row` reads it.
    const COLUMNS: &'static str;

    fn id(&self) -> i64;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Insert a new row from the draft. Returns the number of rows written.
    fn insert(conn: &Connection, draft: &Self::Draft) -> rusqlite::Result<usize>;

    /// Overwrite every scalar field of the row with this record's id.
    fn overwrite(&self, conn: &Connection) -> rusqlite::Result<usize>;
}

impl Record for Film {
    type Draft = NewFilm;

    const TABLE: &'static str = "films";
    const COLUMNS: &'static str = "id, title, year, duration, director_id";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Film {
            id: row.get(0)?,
            title: row.get(1)?,
            year: row.get(2)?,
            duration: row.get(3)?,
            director_id: row.get(4)?,
        })
    }

    fn insert(conn: &Connection, draft: &NewFilm) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO films (title, year, duration) VALUES (?1, ?2, ?3)",
            params![draft.title, draft.year, draft.duration],
        )
    }

    fn overwrite(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE films SET title = ?2, year = ?3, duration = ?4 WHERE id = ?1",
            params![self.id, self.title, self.year, self.duration],
        )
    }
}

impl Record for Person {
    type Draft = NewPerson;

    const TABLE: &'static str = "people";
    const COLUMNS: &'static str = "id, name, birthdate";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Person {
            id: row.get(0)?,
            name: row.get(1)?,
            birthdate: row.get(2)?,
        })
    }

    fn insert(conn: &Connection, draft: &NewPerson) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO people (name, birthdate) VALUES (?1, ?2)",
            params![draft.name, draft.birthdate],
        )
    }

    fn overwrite(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE people SET name = ?2, birthdate = ?3 WHERE id = ?1",
            params![self.id, self.name, self.birthdate],
        )
    }
}

/// Fetch a record by id.
pub fn get<R: Record>(conn: &Connection, id: i64) -> Result<Option<R>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM {} WHERE id = ?1",
        R::COLUMNS,
        R::TABLE
    ))?;
    let result = stmt.query_row(params![id], R::from_row);
    match result {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List records in natural (id) order with offset+limit pagination.
pub fn list<R: Record>(conn: &Connection, skip: u32, limit: u32) -> Result<Vec<R>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM {} ORDER BY id LIMIT ?1 OFFSET ?2",
        R::COLUMNS,
        R::TABLE
    ))?;
    let rows = stmt.query_map(params![limit, skip], R::from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Insert a new record and read it back with its generated id.
pub fn create<R: Record>(conn: &Connection, draft: &R::Draft) -> Result<R, StoreError> {
    R::insert(conn, draft)?;
    let id = conn.last_insert_rowid();
    log::debug!("Created {} row {}", R::TABLE, id);
    get(conn, id)?.ok_or(StoreError::Vanished { table: R::TABLE, id })
}

/// Overwrite all scalar fields of an existing record.
///
/// Returns `None` without touching the store if the id does not exist.
pub fn update<R: Record>(conn: &Connection, record: &R) -> Result<Option<R>, StoreError> {
    let changed = record.overwrite(conn)?;
    if changed == 0 {
        log::debug!("Update skipped: no {} row {}", R::TABLE, record.id());
        return Ok(None);
    }
    get(conn, record.id())
}

/// Remove a record, returning its state immediately before removal.
pub fn delete<R: Record>(conn: &Connection, id: i64) -> Result<Option<R>, StoreError> {
    let Some(existing) = get::<R>(conn, id)? else {
        return Ok(None);
    };
    conn.execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), params![id])?;
    log::debug!("Deleted {} row {}", R::TABLE, id);
    Ok(Some(existing))
}

/// Count all records of a kind.
pub fn count<R: Record>(conn: &Connection) -> Result<i64, StoreError> {
    let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", R::TABLE), [], |r| {
        r.get(0)
    })?;
    Ok(n)
}

//! Director and cast links between films and people.
//!
//! Both ends of a link must exist when it is created. Links are not
//! re-validated afterwards; deleting a person clears them through the schema's
//! foreign key actions.

use cinedex_catalog::types::{Film, FilmDetail, Person};
use rusqlite::{Connection, params, params_from_iter};

use crate::predicate::{FilmFilter, SqlBuilder, qualified_columns};
use crate::store::{Record, StoreError, get};

/// Which films a cast listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastSelector {
    FilmId(i64),
    /// Every film whose title ends with this text.
    TitleSuffix(String),
}

impl CastSelector {
    fn to_filter(&self) -> FilmFilter {
        match self {
            Self::FilmId(id) => FilmFilter::id(*id),
            Self::TitleSuffix(suffix) => FilmFilter::title_ends_with(suffix.clone()),
        }
    }
}

// ── Director ────────────────────────────────────────────────────────────────

/// Point a film's director link at a person.
///
/// Returns `None` if either the film or the person does not exist.
pub fn set_director(
    conn: &Connection,
    film_id: i64,
    person_id: i64,
) -> Result<Option<Film>, StoreError> {
    if get::<Film>(conn, film_id)?.is_none() || get::<Person>(conn, person_id)?.is_none() {
        return Ok(None);
    }
    conn.execute(
        "UPDATE films SET director_id = ?2 WHERE id = ?1",
        params![film_id, person_id],
    )?;
    log::debug!("Film {} directed by person {}", film_id, person_id);
    get(conn, film_id)
}

/// Clear a film's director link. Returns `None` if the film does not exist.
pub fn remove_director(conn: &Connection, film_id: i64) -> Result<Option<Film>, StoreError> {
    let changed = conn.execute(
        "UPDATE films SET director_id = NULL WHERE id = ?1",
        params![film_id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get(conn, film_id)
}

/// The person directing a film.
///
/// `None` both when the film does not exist and when it has no director.
pub fn get_director(conn: &Connection, film_id: i64) -> Result<Option<Person>, StoreError> {
    let Some(film) = get::<Film>(conn, film_id)? else {
        return Ok(None);
    };
    let Some(director_id) = film.director_id else {
        return Ok(None);
    };
    get(conn, director_id)
}

// ── Cast ────────────────────────────────────────────────────────────────────

/// Append a person to a film's cast.
///
/// No deduplication: adding the same person twice lists them twice.
/// Returns `None` if either the film or the person does not exist.
pub fn add_cast_member(
    conn: &Connection,
    film_id: i64,
    person_id: i64,
) -> Result<Option<Film>, StoreError> {
    let Some(film) = get::<Film>(conn, film_id)? else {
        return Ok(None);
    };
    if get::<Person>(conn, person_id)?.is_none() {
        return Ok(None);
    }
    conn.execute(
        "INSERT INTO cast_members (film_id, person_id) VALUES (?1, ?2)",
        params![film_id, person_id],
    )?;
    log::debug!("Person {} added to cast of film {}", person_id, film_id);
    Ok(Some(film))
}

/// Replace a film's cast with exactly the given people, in order.
///
/// Ids that do not resolve to a person are dropped; duplicates are kept.
/// The delete and the inserts commit together. The result is re-read from
/// storage. Returns `None` if the film does not exist.
pub fn replace_cast(
    conn: &Connection,
    film_id: i64,
    person_ids: &[i64],
) -> Result<Option<FilmDetail>, StoreError> {
    if get::<Film>(conn, film_id)?.is_none() {
        return Ok(None);
    }

    let mut resolved = Vec::with_capacity(person_ids.len());
    for &person_id in person_ids {
        if get::<Person>(conn, person_id)?.is_some() {
            resolved.push(person_id);
        } else {
            log::debug!(
                "Dropping unknown person {} from cast of film {}",
                person_id,
                film_id
            );
        }
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM cast_members WHERE film_id = ?1",
        params![film_id],
    )?;
    {
        let mut stmt =
            tx.prepare_cached("INSERT INTO cast_members (film_id, person_id) VALUES (?1, ?2)")?;
        for person_id in &resolved {
            stmt.execute(params![film_id, person_id])?;
        }
    }
    tx.commit()?;

    film_detail(conn, film_id)
}

/// Cast members of every film matching the selector.
///
/// One entry per cast link, newest film first; within a film, in the order
/// the links were made.
pub fn cast_of(conn: &Connection, selector: &CastSelector) -> Result<Vec<Person>, StoreError> {
    let mut sql = SqlBuilder::new();
    let cond = sql.film_conditions(&[selector.to_filter()], "f0");
    let text = format!(
        "SELECT {} FROM cast_members c0
         JOIN films f0 ON f0.id = c0.film_id
         JOIN people p0 ON p0.id = c0.person_id
         WHERE {}
         ORDER BY f0.year DESC, f0.id, c0.rowid",
        qualified_columns("p0", Person::COLUMNS),
        cond,
    );
    let mut stmt = conn.prepare(&text)?;
    let rows = stmt.query_map(params_from_iter(sql.into_params()), Person::from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A film with its director and cast.
pub fn film_detail(conn: &Connection, film_id: i64) -> Result<Option<FilmDetail>, StoreError> {
    let Some(film) = get::<Film>(conn, film_id)? else {
        return Ok(None);
    };
    let director = match film.director_id {
        Some(id) => get::<Person>(conn, id)?,
        None => None,
    };
    let cast = cast_of(conn, &CastSelector::FilmId(film_id))?;
    Ok(Some(FilmDetail {
        film,
        director,
        cast,
    }))
}

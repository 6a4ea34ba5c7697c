//! Grouped statistics over the catalog.
//!
//! Per-year counts and duration figures, and per-person film counts filtered
//! by a minimum threshold.

use cinedex_catalog::types::{Film, Person};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::predicate::{FilmFilter, FilmQuery, qualified_columns};
use crate::store::{Record, StoreError};

/// Number of films released in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub movie_count: i64,
}

/// Film count and duration figures for one year.
///
/// `movie_count` includes films without a duration; the duration figures
/// ignore them and are `None` when no film of the year has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub year: i32,
    pub movie_count: i64,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub avg_duration: Option<f64>,
}

/// A director with the number of films they directed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorStats {
    pub director: Person,
    pub movie_count: i64,
}

/// An actor's name with their film count and career span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorStats {
    pub name: String,
    pub movie_count: i64,
    pub first_year: i32,
    pub last_year: i32,
}

/// Films released in exactly `year`.
pub fn count_by_year(conn: &Connection, year: i32) -> Result<i64, StoreError> {
    FilmQuery::new().filter(FilmFilter::year(year)).count(conn)
}

/// Film count per distinct year, ascending by year.
pub fn group_count_by_year(conn: &Connection) -> Result<Vec<YearCount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT year, COUNT(*) FROM films
         GROUP BY year
         ORDER BY year",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(YearCount {
            year: row.get(0)?,
            movie_count: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Film count and min/max/average duration per year, ascending by year.
pub fn group_duration_stats_by_year(conn: &Connection) -> Result<Vec<YearStats>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT year, COUNT(*), MIN(duration), MAX(duration), AVG(duration)
         FROM films
         GROUP BY year
         ORDER BY year",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(YearStats {
            year: row.get(0)?,
            movie_count: row.get(1)?,
            min_duration: row.get(2)?,
            max_duration: row.get(3)?,
            avg_duration: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Directors with at least `min_count` films, most prolific first.
///
/// Only people currently linked as a director are considered. Ties are broken
/// by name, then id.
pub fn stats_by_director(
    conn: &Connection,
    min_count: i64,
) -> Result<Vec<DirectorStats>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}, COUNT(f.id) AS movie_count
         FROM films f
         JOIN people p ON p.id = f.director_id
         GROUP BY p.id
         HAVING COUNT(f.id) >= ?1
         ORDER BY movie_count DESC, p.name, p.id",
        qualified_columns("p", Person::COLUMNS),
    ))?;
    let rows = stmt.query_map(params![min_count], |row| {
        Ok(DirectorStats {
            director: Person::from_row(row)?,
            movie_count: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Actors with at least `min_count` cast links, most prolific first.
///
/// Every cast link counts, so a person listed twice in one film counts twice.
/// Ties are broken by name, then id.
pub fn stats_by_actor(conn: &Connection, min_count: i64) -> Result<Vec<ActorStats>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT p.name, COUNT(f.id) AS movie_count, MIN(f.year), MAX(f.year)
         FROM cast_members c
         JOIN films f ON f.id = c.film_id
         JOIN people p ON p.id = c.person_id
         GROUP BY p.id
         HAVING COUNT(f.id) >= ?1
         ORDER BY movie_count DESC, p.name, p.id",
    )?;
    let rows = stmt.query_map(params![min_count], |row| {
        Ok(ActorStats {
            name: row.get(0)?,
            movie_count: row.get(1)?,
            first_year: row.get(2)?,
            last_year: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Total number of films.
pub fn film_count(conn: &Connection) -> Result<i64, StoreError> {
    crate::store::count::<Film>(conn)
}

/// Total number of people.
pub fn person_count(conn: &Connection) -> Result<i64, StoreError> {
    crate::store::count::<Person>(conn)
}

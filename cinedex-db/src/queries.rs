//! Read queries for the film catalog.
//!
//! Lookup by title, name, year, birth year, and by director or cast member
//! name suffix. Each query fixes its own ordering.

use cinedex_catalog::types::{Film, Person};
use rusqlite::Connection;

use crate::predicate::{
    Bounds, FilmFilter, FilmOrder, FilmQuery, PersonFilter, PersonOrder, PersonQuery,
};
use crate::store::StoreError;

// ── Film Lookups ────────────────────────────────────────────────────────────

/// Films with exactly this title, oldest first.
pub fn films_by_title(conn: &Connection, title: &str) -> Result<Vec<Film>, StoreError> {
    FilmQuery::new()
        .filter(FilmFilter::title(title))
        .order_by(FilmOrder::YearAsc)
        .fetch(conn)
}

/// Films whose title contains `part`, oldest first.
pub fn films_by_title_part(conn: &Connection, part: &str) -> Result<Vec<Film>, StoreError> {
    FilmQuery::new()
        .filter(FilmFilter::title_contains(part))
        .order_by(FilmOrder::YearAsc)
        .fetch(conn)
}

/// Films released within the inclusive year range, oldest first.
///
/// Returns `None` when both bounds are absent.
pub fn films_by_year_range(
    conn: &Connection,
    year_min: Option<i32>,
    year_max: Option<i32>,
) -> Result<Option<Vec<Film>>, StoreError> {
    let Some(bounds) = Bounds::new(year_min.map(i64::from), year_max.map(i64::from)) else {
        return Ok(None);
    };
    FilmQuery::new()
        .filter(FilmFilter::year_in(bounds))
        .order_by(FilmOrder::YearAsc)
        .fetch(conn)
        .map(Some)
}

/// Films directed by someone whose name ends with `suffix`, newest first.
pub fn films_by_director_suffix(conn: &Connection, suffix: &str) -> Result<Vec<Film>, StoreError> {
    FilmQuery::new()
        .filter(FilmFilter::director(PersonFilter::name_ends_with(suffix)))
        .order_by(FilmOrder::YearDesc)
        .fetch(conn)
}

/// Films with a cast member whose name ends with `suffix`, newest first.
///
/// A film is listed once even if several cast members match.
pub fn films_by_actor_suffix(conn: &Connection, suffix: &str) -> Result<Vec<Film>, StoreError> {
    FilmQuery::new()
        .filter(FilmFilter::cast(PersonFilter::name_ends_with(suffix)))
        .order_by(FilmOrder::YearDesc)
        .fetch(conn)
}

// ── Person Lookups ──────────────────────────────────────────────────────────

/// People with exactly this name.
pub fn people_by_name(conn: &Connection, name: &str) -> Result<Vec<Person>, StoreError> {
    PersonQuery::new()
        .filter(PersonFilter::name(name))
        .order_by(PersonOrder::NameAsc)
        .fetch(conn)
}

/// People whose name contains `part`, by name.
pub fn people_by_name_part(conn: &Connection, part: &str) -> Result<Vec<Person>, StoreError> {
    PersonQuery::new()
        .filter(PersonFilter::name_contains(part))
        .order_by(PersonOrder::NameAsc)
        .fetch(conn)
}

/// People born in `year`, by name. People without a birthdate never match.
pub fn people_by_birth_year(conn: &Connection, year: i32) -> Result<Vec<Person>, StoreError> {
    PersonQuery::new()
        .filter(PersonFilter::birth_year(year))
        .order_by(PersonOrder::NameAsc)
        .fetch(conn)
}

/// People born within the inclusive year range, by name.
///
/// Returns `None` when both bounds are absent.
pub fn people_by_birth_year_range(
    conn: &Connection,
    year_min: Option<i32>,
    year_max: Option<i32>,
) -> Result<Option<Vec<Person>>, StoreError> {
    let Some(bounds) = Bounds::new(year_min.map(i64::from), year_max.map(i64::from)) else {
        return Ok(None);
    };
    PersonQuery::new()
        .filter(PersonFilter::birth_year_in(bounds))
        .order_by(PersonOrder::NameAsc)
        .fetch(conn)
        .map(Some)
}

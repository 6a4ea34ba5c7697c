//! Data model types for the film catalog.
//!
//! These types represent the persistent catalog schema: films, people, and
//! the detail view that joins a film with its director and cast.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ── Film ────────────────────────────────────────────────────────────────────

/// A film as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub year: i32,
    /// Running time in minutes.
    #[serde(default)]
    pub duration: Option<i32>,
    /// Person id of the director. Only changed through the director link
    /// operations, never by a scalar update.
    #[serde(default)]
    pub director_id: Option<i64>,
}

/// Creation payload for a film. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFilm {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub duration: Option<i32>,
}

impl NewFilm {
    pub fn new(title: impl Into<String>, year: i32, duration: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
            duration,
        }
    }
}

// ── Person ──────────────────────────────────────────────────────────────────

/// A person who can direct films and appear in their cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

impl Person {
    /// Year component of the birthdate, if known.
    pub fn birth_year(&self) -> Option<i32> {
        self.birthdate.map(|d| d.year())
    }
}

/// Creation payload for a person. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, birthdate: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            birthdate,
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────────────

/// A film with its director and cast resolved.
///
/// Cast members appear once per cast link, so a person linked twice is
/// listed twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmDetail {
    #[serde(flatten)]
    pub film: Film,
    pub director: Option<Person>,
    pub cast: Vec<Person>,
}

impl FilmDetail {
    pub fn cast_ids(&self) -> Vec<i64> {
        self.cast.iter().map(|p| p.id).collect()
    }
}

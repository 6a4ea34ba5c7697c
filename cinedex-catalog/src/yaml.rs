//! YAML loading for human-curated seed data.
//!
//! A seed file lists people and films. Films refer to people by the seed
//! `key` rather than by database id, since ids are only known after insert.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NewFilm, NewPerson};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// A person entry in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPerson {
    /// Seed-local reference used by `director` and `cast` entries.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

impl SeedPerson {
    pub fn to_new(&self) -> NewPerson {
        NewPerson::new(self.name.clone(), self.birthdate)
    }
}

/// A film entry in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFilm {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
}

impl SeedFilm {
    pub fn to_new(&self) -> NewFilm {
        NewFilm::new(self.title.clone(), self.year, self.duration)
    }
}

/// Contents of one or more seed files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub people: Vec<SeedPerson>,
    #[serde(default)]
    pub films: Vec<SeedFilm>,
}

impl SeedData {
    pub fn extend(&mut self, other: SeedData) {
        self.people.extend(other.people);
        self.films.extend(other.films);
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.films.is_empty()
    }
}

/// Load a single seed file.
///
/// ```text
/// people:
///   - key: nolan
///     name: Christopher Nolan
///     birthdate: 1970-07-30
/// films:
///   - title: Inception
///     year: 2010
///     duration: 148
///     director: nolan
///     cast: [dicaprio]
/// ```
pub fn load_seed_file(path: &Path) -> Result<SeedData, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load and merge every `.yaml`/`.yml` seed file in a directory, in file name order.
///
/// A missing directory yields empty seed data.
pub fn load_seed_dir(dir: &Path) -> Result<SeedData, YamlError> {
    if !dir.exists() {
        return Ok(SeedData::default());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut all = SeedData::default();
    for entry in entries {
        all.extend(load_seed_file(&entry.path())?);
    }
    Ok(all)
}

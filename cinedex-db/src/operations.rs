//! Loading YAML seed data into the catalog.

use std::collections::HashMap;

use cinedex_catalog::types::{Film, Person};
use cinedex_catalog::yaml::{SeedData, YamlError};
use rusqlite::Connection;
use thiserror::Error;

use crate::relations::{add_cast_member, set_director};
use crate::store::{StoreError, create};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Yaml(#[from] YamlError),
    #[error("Duplicate person key '{0}' in seed data")]
    DuplicateKey(String),
}

/// Statistics from seeding the database.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub people: usize,
    pub films: usize,
    pub director_links: usize,
    pub cast_links: usize,
    /// `director`/`cast` references to keys the seed data never defined.
    pub unresolved_keys: Vec<String>,
}

/// Insert every person and film from the seed data, then link directors and cast.
///
/// Each seed entry becomes a new row; seeding twice duplicates the data.
/// Unknown person keys are skipped and reported in the stats.
pub fn seed_from_data(conn: &Connection, seed: &SeedData) -> Result<SeedStats, SeedError> {
    let mut stats = SeedStats::default();
    let mut ids: HashMap<&str, i64> = HashMap::new();

    for person in &seed.people {
        if ids.contains_key(person.key.as_str()) {
            return Err(SeedError::DuplicateKey(person.key.clone()));
        }
        let created: Person = create(conn, &person.to_new())?;
        ids.insert(person.key.as_str(), created.id);
        stats.people += 1;
    }

    for film in &seed.films {
        let created: Film = create(conn, &film.to_new())?;
        stats.films += 1;

        if let Some(key) = &film.director {
            match ids.get(key.as_str()) {
                Some(&person_id) => {
                    if set_director(conn, created.id, person_id)?.is_some() {
                        stats.director_links += 1;
                    }
                }
                None => stats.unresolved_keys.push(key.clone()),
            }
        }

        for key in &film.cast {
            match ids.get(key.as_str()) {
                Some(&person_id) => {
                    if add_cast_member(conn, created.id, person_id)?.is_some() {
                        stats.cast_links += 1;
                    }
                }
                None => stats.unresolved_keys.push(key.clone()),
            }
        }
    }

    for key in &stats.unresolved_keys {
        log::warn!("Seed data references unknown person key '{}'", key);
    }

    Ok(stats)
}

/// Load a seed file or directory of seed files and insert it.
pub fn seed_from_path(conn: &Connection, path: &std::path::Path) -> Result<SeedStats, SeedError> {
    let seed = if path.is_dir() {
        cinedex_catalog::yaml::load_seed_dir(path)?
    } else {
        cinedex_catalog::yaml::load_seed_file(path)?
    };
    seed_from_data(conn, &seed)
}

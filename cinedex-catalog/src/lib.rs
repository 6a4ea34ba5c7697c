//! Film catalog data model types and YAML seed loading.
//!
//! This crate defines the persistent data model for the film catalog without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `cinedex-db` for persistence.

pub mod types;
pub mod yaml;

pub use types::*;
pub use yaml::{SeedData, SeedFilm, SeedPerson, YamlError, load_seed_dir, load_seed_file};

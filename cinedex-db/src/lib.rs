//! SQLite persistence layer for the film catalog.
//!
//! Provides schema creation, the entity store, predicate queries, director
//! and cast links, and grouped statistics, all over a caller-supplied
//! `rusqlite::Connection`.

pub mod operations;
pub mod predicate;
pub mod queries;
pub mod relations;
pub mod schema;
pub mod stats;
pub mod store;

pub use operations::{SeedError, SeedStats, seed_from_data, seed_from_path};
pub use predicate::{
    Bounds, FilmFilter, FilmOrder, FilmQuery, Match, PersonFilter, PersonOrder, PersonQuery,
    Query, Value,
};
pub use queries::{
    films_by_actor_suffix, films_by_director_suffix, films_by_title, films_by_title_part,
    films_by_year_range, people_by_birth_year, people_by_birth_year_range, people_by_name,
    people_by_name_part,
};
pub use relations::{
    CastSelector, add_cast_member, cast_of, film_detail, get_director, remove_director,
    replace_cast, set_director,
};
pub use schema::{SchemaError, open_database, open_memory};
pub use stats::{
    ActorStats, DirectorStats, YearCount, YearStats, count_by_year, film_count,
    group_count_by_year, group_duration_stats_by_year, person_count, stats_by_actor,
    stats_by_director,
};
pub use rusqlite::Connection;
pub use store::{Record, StoreError};

//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Query and edit a small film catalog", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (defaults to the saved setting, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for query results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON on stdout
    Json,
    /// One human-readable line per result
    Text,
}

/// Offset/limit pair shared by the listing commands.
#[derive(Args, Clone, Copy)]
pub(crate) struct PageArgs {
    /// Number of rows to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Maximum number of rows to return
    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

/// Optional lower/upper year bounds.
#[derive(Args, Clone, Copy)]
pub(crate) struct YearBounds {
    /// Earliest year, inclusive
    #[arg(long)]
    pub from: Option<i32>,

    /// Latest year, inclusive
    #[arg(long)]
    pub to: Option<i32>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Query and edit films
    Film {
        #[command(subcommand)]
        action: FilmAction,
    },

    /// Query and edit people
    Person {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Aggregate statistics over the catalog
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Load people and films from a YAML file or a directory of YAML files
    Seed {
        /// Seed file or directory
        path: PathBuf,
    },

    /// Create the database schema
    Init {
        /// Remember this database path in settings.toml
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum FilmAction {
    /// List films in id order
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one film
    Get { id: i64 },

    /// Films with exactly this title, oldest first
    Title { title: String },

    /// Films whose title contains the text, oldest first
    Search { part: String },

    /// Films released within a year range (at least one bound required)
    Years {
        #[command(flatten)]
        bounds: YearBounds,
    },

    /// Add a film
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        year: i32,

        /// Running time in minutes
        #[arg(long)]
        duration: Option<i32>,
    },

    /// Change a film's title, year or duration
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long, conflicts_with = "clear_duration")]
        duration: Option<i32>,

        /// Remove the stored duration
        #[arg(long)]
        clear_duration: bool,
    },

    /// Remove a film and its cast rows
    Delete { id: i64 },

    /// Show a film with its director and cast
    Detail { id: i64 },

    /// Show a film's director
    Director { id: i64 },

    /// List the cast of one film, or of every film whose title ends with a suffix
    Cast {
        /// Film id
        #[arg(long, conflicts_with = "title_suffix", required_unless_present = "title_suffix")]
        film_id: Option<i64>,

        /// Title suffix
        #[arg(long)]
        title_suffix: Option<String>,
    },

    /// Films whose director's name ends with the suffix, newest first
    ByDirector { suffix: String },

    /// Films with a cast member whose name ends with the suffix, newest first
    ByActor { suffix: String },

    /// Link a director to a film
    SetDirector { film_id: i64, person_id: i64 },

    /// Remove a film's director link
    ClearDirector { film_id: i64 },

    /// Append a cast member to a film
    AddCast { film_id: i64, person_id: i64 },

    /// Replace a film's whole cast (unknown person ids are skipped)
    ReplaceCast {
        film_id: i64,

        /// Person ids, comma separated (empty clears the cast)
        #[arg(value_delimiter = ',')]
        person_ids: Vec<i64>,
    },
}

#[derive(Subcommand)]
pub(crate) enum PersonAction {
    /// List people in id order
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one person
    Get { id: i64 },

    /// People with exactly this name
    Name { name: String },

    /// People whose name contains the text
    Search { part: String },

    /// People born in a given year
    Born { year: i32 },

    /// People born within a year range (at least one bound required)
    BornBetween {
        #[command(flatten)]
        bounds: YearBounds,
    },

    /// Add a person
    Create {
        #[arg(long)]
        name: String,

        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birthdate: Option<String>,
    },

    /// Change a person's name or birth date
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// Birth date as YYYY-MM-DD
        #[arg(long, conflicts_with = "clear_birthdate")]
        birthdate: Option<String>,

        /// Remove the stored birth date
        #[arg(long)]
        clear_birthdate: bool,
    },

    /// Remove a person (director links are cleared, cast rows removed)
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum StatsAction {
    /// Number of films and people
    Count,

    /// Number of films released in a year
    CountYear { year: i32 },

    /// Film count per release year
    ByYear,

    /// Film count and duration spread per release year
    Durations,

    /// Directors with at least N films
    Directors {
        #[arg(long, default_value_t = 10)]
        min: i64,
    },

    /// Actors with at least N cast appearances
    Actors {
        #[arg(long, default_value_t = 10)]
        min: i64,
    },
}

//! cinedex CLI
//!
//! Command-line interface over the film catalog database.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_db::Connection;

use cli_types::{Cli, Commands, OutputFormat};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose, cli.format);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// Where log records go. JSON results own stdout, so logging moves to stderr.
fn log_target(format: OutputFormat) -> env_logger::Target {
    match format {
        OutputFormat::Json => env_logger::Target::Stderr,
        OutputFormat::Text => env_logger::Target::Stdout,
    }
}

/// Install `env_logger`. `RUST_LOG` overrides the flag-derived level.
fn init_logging(quiet: bool, verbose: bool, format: OutputFormat) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(log_target(format));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(
                buf,
                "{}: {}",
                level.as_str().to_lowercase(),
                record.args()
            ),
        });
    }
    builder.parse_default_env();
    builder.init();
}

/// Print an empty line through the logger so `--quiet` hides it too.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db_path = settings::resolve_db_path(cli.db);
    let format = cli.format;

    match cli.command {
        Commands::Film { action } => commands::film::run_film(&open(&db_path)?, format, action),
        Commands::Person { action } => {
            commands::person::run_person(&open(&db_path)?, format, action)
        }
        Commands::Stats { action } => {
            commands::stats::run_stats(&open(&db_path)?, &db_path, format, action)
        }
        Commands::Seed { path } => commands::seed::run_seed(&open(&db_path)?, &path),
        Commands::Init { save } => run_init(&db_path, save),
    }
}

/// Open (creating if needed) the catalog database at `path`.
fn open(path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Opening catalog database {}", path.display());
    cinedex_db::open_database(path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database {}: {}",
            path.display(),
            e
        ))
    })
}

fn run_init(db_path: &Path, save: bool) -> Result<(), CliError> {
    let existed = db_path.exists();
    let conn = open(db_path)?;
    let version = cinedex_db::schema::get_schema_version(&conn)?;

    let status = if existed { "(existing)" } else { "(created)" };
    log::info!(
        "{} {} {}",
        "Catalog database:".if_supports_color(Stdout, |t| t.bold()),
        db_path.display(),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Schema version: {}", version);

    if save {
        settings::save_db_path(db_path).map_err(|e| {
            CliError::config(format!(
                "Failed to write {}: {}",
                settings::settings_path().display(),
                e
            ))
        })?;
        log::info!("  Saved to {}", settings::settings_path().display());
    }

    Ok(())
}

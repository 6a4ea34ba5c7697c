use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use cinedex_db::Connection;

use crate::CliError;
use crate::cli_types::{OutputFormat, StatsAction};

use super::emit_all;

#[derive(Serialize)]
struct Totals {
    films: i64,
    people: i64,
}

#[derive(Serialize)]
struct YearTotal {
    year: i32,
    movie_count: i64,
}

pub(crate) fn run_stats(
    conn: &Connection,
    db_path: &Path,
    format: OutputFormat,
    action: StatsAction,
) -> Result<(), CliError> {
    match action {
        StatsAction::Count => {
            let totals = Totals {
                films: cinedex_db::film_count(conn)?,
                people: cinedex_db::person_count(conn)?,
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&totals)?),
                OutputFormat::Text => {
                    log::info!(
                        "{}",
                        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
                    );
                    log::info!("  Database: {}", db_path.display());
                    crate::log_blank();
                    log::info!("  Films:   {:>8}", totals.films);
                    log::info!("  People:  {:>8}", totals.people);
                }
            }
            Ok(())
        }
        StatsAction::CountYear { year } => {
            let total = YearTotal {
                year,
                movie_count: cinedex_db::count_by_year(conn, year)?,
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&total)?),
                OutputFormat::Text => log::info!("  {}  {:>6}", total.year, total.movie_count),
            }
            Ok(())
        }
        StatsAction::ByYear => {
            heading(format, "Films per year");
            emit_all(format, &cinedex_db::group_count_by_year(conn)?)
        }
        StatsAction::Durations => {
            heading(format, "Durations per year (minutes)");
            emit_all(format, &cinedex_db::group_duration_stats_by_year(conn)?)
        }
        StatsAction::Directors { min } => {
            heading(format, &format!("Directors with at least {min} film(s)"));
            emit_all(format, &cinedex_db::stats_by_director(conn, min)?)
        }
        StatsAction::Actors { min } => {
            heading(format, &format!("Actors with at least {min} appearance(s)"));
            emit_all(format, &cinedex_db::stats_by_actor(conn, min)?)
        }
    }
}

fn heading(format: OutputFormat, title: &str) {
    if format == OutputFormat::Text {
        log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    }
}

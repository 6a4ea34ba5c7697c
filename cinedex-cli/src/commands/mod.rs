pub(crate) mod film;
pub(crate) mod person;
pub(crate) mod seed;
pub(crate) mod stats;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use cinedex_catalog::types::{Film, FilmDetail, Person};
use cinedex_db::{ActorStats, DirectorStats, YearCount, YearStats};

use crate::CliError;
use crate::cli_types::OutputFormat;

/// One-line (or short block) rendering used by `--format text`.
pub(crate) trait TextRow {
    fn text_row(&self) -> String;
}

impl TextRow for Film {
    fn text_row(&self) -> String {
        let duration = self
            .duration
            .map(|d| format!(", {d} min"))
            .unwrap_or_default();
        format!(
            "{:>5}  {} ({}{})",
            self.id,
            self.title.if_supports_color(Stdout, |t| t.bold()),
            self.year,
            duration,
        )
    }
}

impl TextRow for Person {
    fn text_row(&self) -> String {
        match self.birthdate {
            Some(born) => format!("{:>5}  {} (b. {})", self.id, self.name, born),
            None => format!("{:>5}  {}", self.id, self.name),
        }
    }
}

impl TextRow for FilmDetail {
    fn text_row(&self) -> String {
        let mut out = self.film.text_row();
        let director = match &self.director {
            Some(d) => d.name.as_str(),
            None => "-",
        };
        out.push_str(&format!("\n       Director: {director}"));
        if self.cast.is_empty() {
            out.push_str("\n       Cast: -");
        } else {
            out.push_str("\n       Cast:");
            for person in &self.cast {
                out.push_str(&format!("\n         {}", person.name));
            }
        }
        out
    }
}

impl TextRow for YearCount {
    fn text_row(&self) -> String {
        format!("  {}  {:>6}", self.year, self.movie_count)
    }
}

impl TextRow for YearStats {
    fn text_row(&self) -> String {
        let opt = |v: Option<i32>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
        let avg = self
            .avg_duration
            .map(|a| format!("{a:.1}"))
            .unwrap_or_else(|| "-".into());
        format!(
            "  {}  {:>6}  min {:>4}  max {:>4}  avg {:>6}",
            self.year,
            self.movie_count,
            opt(self.min_duration),
            opt(self.max_duration),
            avg,
        )
    }
}

impl TextRow for DirectorStats {
    fn text_row(&self) -> String {
        format!("  {:>4}  {}", self.movie_count, self.director.name)
    }
}

impl TextRow for ActorStats {
    fn text_row(&self) -> String {
        format!(
            "  {:>4}  {} ({}-{})",
            self.movie_count, self.name, self.first_year, self.last_year
        )
    }
}

/// Print a single result.
pub(crate) fn emit<T: Serialize + TextRow>(format: OutputFormat, value: &T) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => log::info!("{}", value.text_row()),
    }
    Ok(())
}

/// Print a list of results. Text output notes when nothing matched.
pub(crate) fn emit_all<T: Serialize + TextRow>(
    format: OutputFormat,
    values: &[T],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
        OutputFormat::Text => {
            if values.is_empty() {
                log::info!("{}", "No results".if_supports_color(Stdout, |t| t.dimmed()));
            }
            for value in values {
                log::info!("{}", value.text_row());
            }
        }
    }
    Ok(())
}

/// Turn an absent lookup into a not-found error.
pub(crate) fn found<T>(value: Option<T>, what: impl FnOnce() -> String) -> Result<T, CliError> {
    value.ok_or_else(|| CliError::not_found(what()))
}

/// Parse a `YYYY-MM-DD` birth date.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| CliError::validation(format!("'{s}' is not a YYYY-MM-DD date: {e}")))
}

/// Reject empty names and titles before they reach the database.
pub(crate) fn non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CliError::validation(format!("{field} must not be empty")))
    } else {
        Ok(trimmed)
    }
}

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_db::Connection;

use crate::CliError;

pub(crate) fn run_seed(conn: &Connection, path: &Path) -> Result<(), CliError> {
    if !path.exists() {
        return Err(CliError::seed(format!("{} does not exist", path.display())));
    }

    let stats = cinedex_db::seed_from_path(conn, path)?;

    log::info!(
        "{} {}",
        "Seeded from".if_supports_color(Stdout, |t| t.bold()),
        path.display(),
    );
    log::info!("  People:          {:>6}", stats.people);
    log::info!("  Films:           {:>6}", stats.films);
    log::info!("  Director links:  {:>6}", stats.director_links);
    log::info!("  Cast links:      {:>6}", stats.cast_links);
    if !stats.unresolved_keys.is_empty() {
        log::warn!(
            "  {} unresolved person key(s): {}",
            stats.unresolved_keys.len(),
            stats.unresolved_keys.join(", "),
        );
    }

    Ok(())
}

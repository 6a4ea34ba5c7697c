//! Settings file handling: `~/.config/cinedex/settings.toml`.
//!
//! The only setting today is the catalog database location:
//!
//! ```toml
//! [database]
//! path = "/home/me/films.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cinedex").join("settings.toml")
}

/// Database used when neither `--db` nor the settings file names one.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("cinedex").join("catalog.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. `<data_dir>/cinedex/catalog.db`
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_db_path(&settings_path()) {
        return p;
    }
    default_db_path()
}

/// Parse a settings file into a table. A missing file is an empty table; an
/// unparsable one is logged and treated as empty.
fn read_table(settings: &Path) -> toml::Table {
    let Ok(contents) = std::fs::read_to_string(settings) else {
        return toml::Table::new();
    };
    contents.parse().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable {}: {}", settings.display(), e);
        toml::Table::new()
    })
}

/// Read `database.path` from a settings file, if set.
fn load_db_path(settings: &Path) -> Option<PathBuf> {
    let doc = read_table(settings);
    match doc.get("database")?.get("path")?.as_str()? {
        "" => None,
        path => Some(PathBuf::from(path)),
    }
}

/// Save the database path into `settings.toml`, keeping any other keys.
pub(crate) fn save_db_path(path: &Path) -> io::Result<()> {
    write_db_path(&settings_path(), path)
}

fn write_db_path(settings: &Path, path: &Path) -> io::Result<()> {
    let mut doc = read_table(settings);
    let database = doc
        .entry("database")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(database) = database else {
        return Err(io::Error::other(format!(
            "[database] in {} is not a table",
            settings.display()
        )));
    };
    database.insert(
        "path".to_string(),
        toml::Value::from(path.to_string_lossy().into_owned()),
    );

    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    replace_file(settings, &serialized)
}

/// Write through a sibling temp file so readers never see a half-written file.
fn replace_file(target: &Path, contents: &str) -> io::Result<()> {
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let staged = target.with_extension("toml.tmp");
    std::fs::write(&staged, contents)?;
    std::fs::rename(&staged, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cli_override_wins() {
        let p = PathBuf::from("/tmp/override.db");
        assert_eq!(resolve_db_path(Some(p.clone())), p);
    }

    #[test]
    fn missing_file_has_no_path() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_db_path(&tmp.path().join("settings.toml")), None);
    }

    #[test]
    fn write_then_load() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("nested").join("settings.toml");
        let db = tmp.path().join("films.db");

        write_db_path(&settings, &db).unwrap();
        assert_eq!(load_db_path(&settings), Some(db));
    }

    #[test]
    fn write_keeps_other_keys() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "[display]\ncolor = false\n").unwrap();

        write_db_path(&settings, Path::new("/data/films.db")).unwrap();

        let doc = read_table(&settings);
        let color = doc.get("display").and_then(|d| d.get("color"));
        assert_eq!(color.and_then(|v| v.as_bool()), Some(false));
        assert_eq!(load_db_path(&settings), Some(PathBuf::from("/data/films.db")));
    }

    #[test]
    fn unparsable_file_is_replaced_on_save() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "this is = = not toml").unwrap();
        assert_eq!(load_db_path(&settings), None);

        write_db_path(&settings, Path::new("/data/films.db")).unwrap();
        assert_eq!(load_db_path(&settings), Some(PathBuf::from("/data/films.db")));
    }

    #[test]
    fn non_table_database_key_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "database = \"films.db\"\n").unwrap();
        assert!(write_db_path(&settings, Path::new("/data/films.db")).is_err());
    }

    #[test]
    fn empty_path_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "[database]\npath = \"\"\n").unwrap();
        assert_eq!(load_db_path(&settings), None);
    }
}

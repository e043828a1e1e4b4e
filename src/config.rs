use std::{
    collections::HashSet,
    env,
    path::{Path, PathBuf},
};

use figment::providers::{Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::buffer::DEFAULT_CAPACITY;
use crate::dispatch::DeleteKey;
use crate::error::SetupError;
use crate::mode::SearchMode;

const APP_NAME: &str = "tty-cheatsheet";
const DATABASE_DIR: &str = ".tty_cheatsheet";

#[derive(Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    editor: EditorSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Deserialize)]
#[serde(default)]
struct DatabaseSection {
    path: Option<String>,
    announce: bool,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: None,
            announce: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct EditorSection {
    capacity: usize,
    initial_mode: SearchMode,
    delete_key: DeleteKey,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            initial_mode: SearchMode::default(),
            delete_key: DeleteKey::default(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: Option<String>,
    directory: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database: PathBuf,
    /// Show the first-run banner when the database is created.
    pub announce: bool,
    pub capacity: usize,
    pub initial_mode: SearchMode,
    pub delete_key: DeleteKey,
    pub log_level: Option<String>,
    pub log_dir: PathBuf,
}

pub fn home_dir() -> Result<PathBuf, SetupError> {
    let value = env::var("HOME").map_err(|_| SetupError::HomeNotSet)?;
    Ok(PathBuf::from(value))
}

pub fn load() -> Result<Config, SetupError> {
    let home = home_dir()?;
    load_from(&home)
}

pub fn load_from(home: &Path) -> Result<Config, SetupError> {
    let mut figment = Figment::new();
    for path in config_paths(home) {
        if path.is_file() {
            figment = figment.merge(Toml::file(&path));
        }
    }
    let file: ConfigFile = figment.extract()?;
    resolve(file, home)
}

fn resolve(file: ConfigFile, home: &Path) -> Result<Config, SetupError> {
    if file.editor.capacity == 0 {
        return Err(SetupError::InvalidCapacity);
    }
    let database = file
        .database
        .path
        .as_deref()
        .and_then(|raw| expand_path(raw, home))
        .unwrap_or_else(|| home.join(DATABASE_DIR));
    let log_dir = file
        .logging
        .directory
        .as_deref()
        .and_then(|raw| expand_path(raw, home))
        .unwrap_or_else(|| default_log_dir(home));
    Ok(Config {
        database,
        announce: file.database.announce,
        capacity: file.editor.capacity,
        initial_mode: file.editor.initial_mode,
        delete_key: file.editor.delete_key,
        log_level: file.logging.level.filter(|level| !level.trim().is_empty()),
        log_dir,
    })
}

/// Lowest precedence first; later files override earlier ones.
fn config_paths(home: &Path) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(format!("/etc/{APP_NAME}/config.toml"))];
    let xdg = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.join(".config"));
    paths.push(xdg.join(APP_NAME).join("config.toml"));
    paths.push(home.join(".config").join(APP_NAME).join("config.toml"));
    paths.push(home.join(".tty_cheatsheet.toml"));
    if let Ok(path) = env::var("TTY_CHEATSHEET_CONFIG") {
        if !path.trim().is_empty() {
            paths.push(PathBuf::from(path));
        }
    }

    let mut seen = HashSet::new();
    paths.retain(|path| seen.insert(path.clone()));
    paths
}

fn default_log_dir(home: &Path) -> PathBuf {
    env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.join(".local/state"))
        .join(APP_NAME)
}

fn expand_path(raw: &str, home: &Path) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut value = trimmed.to_string();
    if value == "~" || value.starts_with("~/") {
        value = value.replacen('~', &home.to_string_lossy(), 1);
    }
    if value.contains("$HOME") {
        value = value.replace("$HOME", &home.to_string_lossy());
    }
    let path = PathBuf::from(value);
    if path.is_relative() {
        Some(home.join(path))
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in(jail: &Jail) -> figment::error::Result<Config> {
        let config = load_from(jail.directory()).map_err(|err| err.to_string())?;
        Ok(config)
    }

    #[test]
    fn defaults_without_any_file() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.set_env("XDG_STATE_HOME", jail.directory().join("state").display());
            let home = jail.directory();
            let config = load_in(jail)?;
            assert_eq!(config.database, home.join(".tty_cheatsheet"));
            assert!(config.announce);
            assert_eq!(config.capacity, 128);
            assert_eq!(config.initial_mode, SearchMode::Topic);
            assert_eq!(config.delete_key, DeleteKey::Forward);
            assert_eq!(config.log_level, None);
            assert_eq!(config.log_dir, home.join("state").join("tty-cheatsheet"));
            Ok(())
        });
    }

    #[test]
    fn home_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(
                ".tty_cheatsheet.toml",
                r#"
                [database]
                path = "~/notes/cheats"
                announce = false

                [editor]
                capacity = 64
                initial_mode = "whole-database"
                delete_key = "backward"

                [logging]
                level = "debug"
                directory = "$HOME/logs"
                "#,
            )?;
            let home = jail.directory();
            let config = load_in(jail)?;
            assert_eq!(config.database, home.join("notes/cheats"));
            assert!(!config.announce);
            assert_eq!(config.capacity, 64);
            assert_eq!(config.initial_mode, SearchMode::WholeDatabase);
            assert_eq!(config.delete_key, DeleteKey::Backward);
            assert_eq!(config.log_level.as_deref(), Some("debug"));
            assert_eq!(config.log_dir, home.join("logs"));
            Ok(())
        });
    }

    #[test]
    fn env_config_wins_over_home_file() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(".tty_cheatsheet.toml", "[editor]\ncapacity = 64\n")?;
            jail.create_file("override.toml", "[editor]\ncapacity = 32\n")?;
            jail.set_env(
                "TTY_CHEATSHEET_CONFIG",
                jail.directory().join("override.toml").display(),
            );
            let config = load_in(jail)?;
            assert_eq!(config.capacity, 32);
            Ok(())
        });
    }

    #[test]
    fn zero_capacity_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(".tty_cheatsheet.toml", "[editor]\ncapacity = 0\n")?;
            let result = load_from(jail.directory());
            assert!(matches!(result, Err(SetupError::InvalidCapacity)));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(".tty_cheatsheet.toml", "[editor]\ninitial_mode = \"sideways\"\n")?;
            let result = load_from(jail.directory());
            assert!(matches!(result, Err(SetupError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn expands_home_references() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_path("~", home), Some(PathBuf::from("/home/ada")));
        assert_eq!(
            expand_path("~/db", home),
            Some(PathBuf::from("/home/ada/db"))
        );
        assert_eq!(
            expand_path("$HOME/db", home),
            Some(PathBuf::from("/home/ada/db"))
        );
        assert_eq!(expand_path("db", home), Some(PathBuf::from("/home/ada/db")));
        assert_eq!(expand_path("/srv/db", home), Some(PathBuf::from("/srv/db")));
        assert_eq!(expand_path("  ", home), None);
    }
}

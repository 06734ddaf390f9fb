//! Configuration loading and management.

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use crate::organizer::{FilterOption, SortOption};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TODO_CONFIG_PATH";

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "todo.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

/// Store-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How long SQLite waits on a lock held by another process.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tasks.db")
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Defaults for list views when no option is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_filter: FilterOption,

    #[serde(default)]
    pub default_sort: SortOption,
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve configuration from the usual places.
    ///
    /// An explicit path (argument or `TODO_CONFIG_PATH`) must load. Otherwise
    /// the first existing file of `./todo.yaml` and the user config wins, and
    /// defaults apply when neither exists. Environment overrides go on top.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load(&path)?,
            None => match Self::candidate_paths().into_iter().find(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "Using config file");
                    Self::load(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("todo-organizer").join("config.yaml"));
        }
        paths
    }

    /// Apply `TODO_DB_PATH` and `TODO_BUSY_TIMEOUT_MS` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var("TODO_DB_PATH") {
            self.store.db_path = PathBuf::from(db_path);
        }

        if let Ok(timeout) = std::env::var("TODO_BUSY_TIMEOUT_MS") {
            if let Ok(timeout) = timeout.parse() {
                self.store.busy_timeout_ms = timeout;
            }
        }
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.store.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }
        Ok(())
    }
}

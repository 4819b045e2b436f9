//! Session configuration.
//!
//! # Responsibility
//! - Resolve where the active and archive task files live.
//! - Apply `TASKFLOW_*` environment overrides on top of defaults.
//!
//! # Invariants
//! - Empty environment values never override a setting.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";
pub const DEFAULT_ARCHIVE_FILE: &str = "archive.txt";

pub const ENV_DATA_DIR: &str = "TASKFLOW_DATA_DIR";
pub const ENV_TASKS_FILE: &str = "TASKFLOW_TASKS_FILE";
pub const ENV_ARCHIVE_FILE: &str = "TASKFLOW_ARCHIVE_FILE";

/// File locations for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub tasks_file: String,
    pub archive_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tasks_file: DEFAULT_TASKS_FILE.to_string(),
            archive_file: DEFAULT_ARCHIVE_FILE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Uses the given directory with default file names.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_file)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(file) = non_empty(ENV_TASKS_FILE) {
            self.tasks_file = file.trim().to_string();
        }
        if let Some(file) = non_empty(ENV_ARCHIVE_FILE) {
            self.archive_file = file.trim().to_string();
        }
    }
}

//! Runtime configuration read from the environment.
//!
//! # Invariants
//! - Every setting has a default; an empty variable counts as unset.
//! - `log_dir = None` means file logging stays off.

use crate::logging::default_log_level;
use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_VAR: &str = "LLMNOTE_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "LLMNOTE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LLMNOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "llmnote.sqlite3";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an absolute path, got `{value}`")]
    RelativeLogDir { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `LLMNOTE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(db_path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        if let Some(log_dir) = read(LOG_DIR_VAR) {
            let path = PathBuf::from(&log_dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir {
                    var: LOG_DIR_VAR,
                    value: log_dir,
                });
            }
            config.log_dir = Some(path);
        }
        Ok(config)
    }
}

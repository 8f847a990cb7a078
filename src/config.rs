//! Configuration management for the phonebook.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is read first if present.

use crate::error::{ConfigError, ConfigResult};
use crate::storage::StorageKind;
use std::env;
use std::path::PathBuf;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration for the phonebook.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (default: delimited)
    pub storage: StorageKind,

    /// Location of the backing file or database.
    /// Defaults to the backend's own file name in the working directory.
    pub storage_path: PathBuf,

    /// Log level (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PHONEBOOK_STORAGE`: `delimited`, `json` or `sqlite` (default: delimited)
    /// - `PHONEBOOK_PATH`: Backend path (default: contacts.txt, contacts.json or phonebook.db)
    /// - `LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let storage = match env::var("PHONEBOOK_STORAGE") {
            Ok(val) => val.parse::<StorageKind>()?,
            Err(_) => StorageKind::default(),
        };

        let storage_path = match env::var("PHONEBOOK_PATH") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "PHONEBOOK_PATH".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => storage.default_path(),
        };

        let log_level = Self::parse_log_level("LOG_LEVEL", "warn")?;

        Ok(Config {
            storage,
            storage_path,
            log_level,
        })
    }

    /// Read a log level variable, lowercased, with a default value.
    fn parse_log_level(var_name: &str, default: &str) -> ConfigResult<String> {
        match env::var(var_name) {
            Ok(val) => {
                let level = val.trim().to_lowercase();
                if LOG_LEVELS.contains(&level.as_str()) {
                    Ok(level)
                } else {
                    Err(ConfigError::InvalidValue {
                        var: var_name.to_string(),
                        reason: format!("Must be one of {}, got: {}", LOG_LEVELS.join(", "), val),
                    })
                }
            }
            Err(_) => Ok(default.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let storage = StorageKind::default();
        Config {
            storage,
            storage_path: storage.default_path(),
            log_level: "warn".to_string(),
        }
    }
}

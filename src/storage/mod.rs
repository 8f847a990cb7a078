//! Persistence backends for the phonebook.
//!
//! All backends implement [`ContactStorage`] and are interchangeable; the
//! application picks one at startup with [`open_storage`]. Every backend
//! runs loaded records through the same validation as user input, and a
//! single bad record fails the whole load.

mod delimited;
mod json;
mod loader;
mod sqlite;
mod traits;

pub use delimited::DelimitedFileStorage;
pub use json::JsonFileStorage;
pub use sqlite::SqliteStorage;
pub use traits::ContactStorage;

use crate::error::{ConfigError, StorageError, StorageResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Available storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// One `;`-separated record per line
    #[default]
    Delimited,
    /// A JSON array of contacts
    Json,
    /// SQLite database with `contacts` and `phones` tables
    Sqlite,
}

impl StorageKind {
    /// Path used when none is configured.
    pub fn default_path(&self) -> PathBuf {
        PathBuf::from(match self {
            Self::Delimited => "contacts.txt",
            Self::Json => "contacts.json",
            Self::Sqlite => "phonebook.db",
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delimited" | "file" | "txt" => Ok(Self::Delimited),
            "json" => Ok(Self::Json),
            "sqlite" | "db" => Ok(Self::Sqlite),
            other => Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_STORAGE".to_string(),
                reason: format!(
                    "Must be one of delimited, json, sqlite, got: {}",
                    other
                ),
            }),
        }
    }
}

/// Open the backend of the given kind at `path`.
///
/// File backends are created lazily on first save; the SQLite backend opens
/// (and migrates) its database right away.
pub fn open_storage(kind: StorageKind, path: &Path) -> StorageResult<Box<dyn ContactStorage>> {
    tracing::info!(backend = kind.as_str(), path = %path.display(), "Opening storage");
    Ok(match kind {
        StorageKind::Delimited => Box::new(DelimitedFileStorage::new(path)),
        StorageKind::Json => Box::new(JsonFileStorage::new(path)),
        StorageKind::Sqlite => Box::new(SqliteStorage::open(path)?),
    })
}

/// The "last error" side channel every backend exposes.
#[derive(Debug, Default)]
pub(crate) struct LastError(Option<String>);

impl LastError {
    /// Clear at the start of a load or save.
    pub(crate) fn reset(&mut self) {
        self.0 = None;
    }

    /// Remember the failure of `result`, if any, and pass it through.
    pub(crate) fn record<T>(&mut self, result: StorageResult<T>) -> StorageResult<T> {
        if let Err(ref err) = result {
            tracing::debug!(error = %err, "Storage operation failed");
            self.0 = Some(err.to_string());
        }
        result
    }

    pub(crate) fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Write `path` all-or-nothing: the content goes to a temporary file in the
/// same directory, which then replaces the target.
pub(crate) fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut dyn Write) -> StorageResult<()>,
) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(path, e))?;
    {
        let mut writer: BufWriter<&mut File> = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| StorageError::io(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| StorageError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;
    Ok(())
}

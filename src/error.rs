//! Error types for the phonebook.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level validation failures live in [`crate::domain::ValidationError`].

use crate::domain::{ContactId, ValidationError};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Cannot access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// SQLite reported an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The JSON document could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted record could not be parsed at all
    #[error("{location}: {reason}")]
    Malformed { location: String, reason: String },

    /// A persisted record parsed but failed validation
    #[error("{location}: {source}")]
    InvalidRecord {
        location: String,
        #[source]
        source: ValidationError,
    },

    /// The database was written by a newer schema
    #[error("Database schema version {found} is newer than supported {supported}")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`crate::services::ContactService`] operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input failed a field rule or a uniqueness check
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No contact with this id
    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    /// The phone index does not exist on the contact
    #[error("Contact {id} has no phone number at index {index}")]
    PhoneIndexOutOfRange { id: ContactId, index: usize },

    /// Deleting would leave the contact without phone numbers
    #[error("Cannot delete the only phone number of contact {0}")]
    LastPhoneNumber(ContactId),

    /// Every id up to `u32::MAX` has been handed out
    #[error("No contact ids left")]
    IdsExhausted,

    /// Loading or saving failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

//! Phonebook - a personal contact directory.
//!
//! This library keeps contacts (names, address, birth date, email and any
//! number of labelled phone numbers), validates and normalizes every field,
//! and offers multi-criterion search, stable multi-key sort and manual
//! reordering. Contacts persist through interchangeable storage backends.
//!
//! # Architecture
//!
//! - **domain**: Value objects (ids, birth dates) and validation errors
//! - **validation**: Field rules and phone/email normalization
//! - **models**: The contact entity and raw input drafts
//! - **phonebook**: The in-memory collection with search and sort
//! - **storage**: Delimited text, JSON and SQLite backends
//! - **services**: Validated mutations and load/save orchestration
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod phonebook;
pub mod services;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use domain::{BirthDate, ContactId, NameField, ValidationError};
pub use error::{ConfigError, ServiceError, StorageError};
pub use models::{Contact, ContactDraft, PhoneNumber};
pub use phonebook::{
    Phonebook, SearchCriteria, SearchField, SortCriterion, SortDirection, SortField,
};
pub use services::ContactService;
pub use storage::{
    open_storage, ContactStorage, DelimitedFileStorage, JsonFileStorage, SqliteStorage,
    StorageKind,
};

//! JSON file storage.
//!
//! The file holds one array of contact objects, in the same shape
//! [`Contact`] serializes to. Records are read into a loose form first so
//! that bad ids and field values surface as validation errors instead of
//! parse failures.

use super::loader::RecordValidator;
use super::{write_atomically, ContactStorage, LastError};
use crate::domain::BirthDate;
use crate::error::{StorageError, StorageResult};
use crate::models::{Contact, ContactDraft, PhoneNumber};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A persisted contact before validation.
#[derive(Debug, Deserialize)]
struct StoredContact {
    id: i64,
    surname: String,
    forename: String,
    #[serde(default)]
    patronymic: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    birth_date: BirthDate,
    email: String,
    #[serde(default)]
    phone_numbers: Vec<PhoneNumber>,
}

impl StoredContact {
    fn into_parts(self) -> (i64, ContactDraft) {
        let draft = ContactDraft {
            surname: self.surname,
            forename: self.forename,
            patronymic: self.patronymic,
            address: self.address,
            birth_date: self.birth_date,
            email: self.email,
            phone_numbers: self.phone_numbers,
        };
        (self.id, draft)
    }
}

/// Storage backed by a JSON file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    last_error: LastError,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last_error: LastError::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<Vec<Contact>> {
        let started_at = Instant::now();
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let records: Vec<StoredContact> = serde_json::from_str(&text)?;

        let mut validator = RecordValidator::new();
        let mut contacts = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let (id, draft) = record.into_parts();
            let contact = validator
                .accept(id, draft)
                .map_err(|source| StorageError::InvalidRecord {
                    location: format!("Record {}", idx + 1),
                    source,
                })?;
            contacts.push(contact);
        }

        tracing::info!(
            path = %self.path.display(),
            count = contacts.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Loaded contacts from JSON file"
        );
        Ok(contacts)
    }

    fn write_all(&self, contacts: &[Contact]) -> StorageResult<()> {
        write_atomically(&self.path, |out| {
            serde_json::to_writer_pretty(&mut *out, contacts)?;
            out.write_all(b"\n")
                .map_err(|e| StorageError::io(&self.path, e))
        })?;
        tracing::info!(
            path = %self.path.display(),
            count = contacts.len(),
            "Saved contacts to JSON file"
        );
        Ok(())
    }
}

impl ContactStorage for JsonFileStorage {
    fn load(&mut self) -> StorageResult<Vec<Contact>> {
        self.last_error.reset();
        let result = self.read_all();
        self.last_error.record(result)
    }

    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()> {
        self.last_error.reset();
        let result = self.write_all(contacts);
        self.last_error.record(result)
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.get()
    }
}

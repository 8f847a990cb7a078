use phonebook::error::{StorageError, StorageResult};
use phonebook::storage::ContactStorage;
use phonebook::Contact;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock storage backend for testing.
///
/// Keeps the "persisted" contacts in memory, can be told to fail, and
/// tracks method calls for verification. Clones share state, so a test can
/// keep a handle after boxing one into a service.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactStorage {
    contacts: Arc<Mutex<Vec<Contact>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    last_error: Option<String>,
}

#[allow(dead_code)]
impl MockContactStorage {
    /// Create a new empty MockContactStorage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that already holds `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let storage = Self::new();
        *storage.contacts.lock().unwrap() = contacts;
        storage
    }

    /// Make every following load and save fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Let loads and saves succeed again.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Contacts as last saved (or seeded).
    pub fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_failure(&mut self) -> StorageResult<()> {
        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some(reason) => {
                let err = StorageError::Malformed {
                    location: "mock".to_string(),
                    reason,
                };
                self.last_error = Some(err.to_string());
                Err(err)
            }
            None => Ok(()),
        }
    }
}

impl ContactStorage for MockContactStorage {
    fn load(&mut self) -> StorageResult<Vec<Contact>> {
        self.track_call("load");
        self.last_error = None;
        self.check_failure()?;
        Ok(self.stored())
    }

    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()> {
        self.track_call("save");
        self.last_error = None;
        self.check_failure()?;
        *self.contacts.lock().unwrap() = contacts.to_vec();
        Ok(())
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

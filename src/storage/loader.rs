//! Validation shared by every storage loader.

use crate::domain::{ContactId, ValidationError};
use crate::models::{Contact, ContactDraft};
use crate::validation::{normalize_email, normalize_phone_number, validate_draft};
use std::collections::HashSet;

/// Checks records one by one during a bulk load and tracks what has been
/// seen so far, so that ids, emails and phone numbers stay unique across the
/// whole collection.
#[derive(Debug, Default)]
pub(crate) struct RecordValidator {
    ids: HashSet<ContactId>,
    emails: HashSet<String>,
    phones: HashSet<String>,
}

impl RecordValidator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Validate one persisted record and turn it into a contact carrying
    /// its stored id.
    pub(crate) fn accept(&mut self, id: i64, draft: ContactDraft) -> Result<Contact, ValidationError> {
        let id = u32::try_from(id)
            .ok()
            .filter(|&id| id > 0)
            .map(ContactId::new)
            .ok_or(ValidationError::InvalidId(id))?;
        if self.ids.contains(&id) {
            return Err(ValidationError::DuplicateId(id));
        }

        validate_draft(&draft)?;

        let email = normalize_email(&draft.email);
        if self.emails.contains(&email) {
            return Err(ValidationError::DuplicateEmail(email));
        }

        let numbers: Vec<String> = draft
            .phone_numbers
            .iter()
            .map(|p| normalize_phone_number(&p.number))
            .collect();
        if let Some(taken) = numbers.iter().find(|n| self.phones.contains(*n)) {
            return Err(ValidationError::DuplicatePhoneNumber(taken.clone()));
        }

        self.ids.insert(id);
        self.emails.insert(email);
        self.phones.extend(numbers);

        let mut contact = draft.into_contact();
        contact.set_id(id);
        Ok(contact)
    }
}

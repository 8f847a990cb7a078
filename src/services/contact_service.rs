//! Contact service layer.
//!
//! Entry point for shells: raw input is validated and checked for
//! uniqueness here before the phonebook is touched, and the phonebook is
//! hydrated from and persisted to a [`ContactStorage`] backend.

use crate::domain::{ContactId, ValidationError};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Contact, ContactDraft};
use crate::phonebook::Phonebook;
use crate::storage::ContactStorage;
use crate::validation::{normalize_email, normalize_phone_number, validate_draft, validate_phone};

/// A phonebook together with the storage it is loaded from and saved to.
pub struct ContactService {
    phonebook: Phonebook,
    storage: Box<dyn ContactStorage>,
}

impl ContactService {
    /// Create a service with an empty phonebook. Call [`load`](Self::load)
    /// to hydrate it.
    pub fn new(storage: Box<dyn ContactStorage>) -> Self {
        Self {
            phonebook: Phonebook::new(),
            storage,
        }
    }

    /// Replace the phonebook with the persisted contacts and return how many
    /// were loaded.
    ///
    /// On failure the phonebook is left empty.
    pub fn load(&mut self) -> ServiceResult<usize> {
        self.phonebook = Phonebook::new();
        let contacts = self.storage.load().map_err(|err| {
            tracing::warn!(error = %err, "Failed to load contacts");
            err
        })?;

        for contact in contacts {
            self.phonebook.add_contact_from_storage(contact);
        }
        self.phonebook.initialize_next_id();

        tracing::info!(
            count = self.phonebook.len(),
            next_id = ?self.phonebook.next_id(),
            "Phonebook loaded"
        );
        Ok(self.phonebook.len())
    }

    /// Persist every contact in the current order.
    pub fn save(&mut self) -> ServiceResult<()> {
        self.storage.save(self.phonebook.get_all_contacts())?;
        Ok(())
    }

    /// Reason the last load or save failed, as reported by the backend.
    pub fn last_storage_error(&self) -> Option<&str> {
        self.storage.last_error()
    }

    pub fn phonebook(&self) -> &Phonebook {
        &self.phonebook
    }

    /// Mutable access for sort and reorder. Field edits should go through
    /// the service so that they are validated.
    pub fn phonebook_mut(&mut self) -> &mut Phonebook {
        &mut self.phonebook
    }

    pub fn find_contact(&self, id: ContactId) -> ServiceResult<&Contact> {
        self.phonebook
            .find_contact(id)
            .ok_or(ServiceError::NotFound(id))
    }

    /// Validate `draft`, check it against every other contact, and add it
    /// under a new id.
    pub fn add_contact(&mut self, draft: ContactDraft) -> ServiceResult<ContactId> {
        self.check_draft(&draft, ContactId::UNASSIGNED)?;
        let id = self
            .phonebook
            .add_contact(draft.into_contact())
            .ok_or(ServiceError::IdsExhausted)?;
        tracing::info!(id = %id, "Contact created");
        Ok(id)
    }

    /// Replace every field of contact `id` with `draft`, phone list included.
    pub fn update_contact(&mut self, id: ContactId, draft: ContactDraft) -> ServiceResult<()> {
        self.find_contact(id)?;
        self.check_draft(&draft, id)?;
        self.phonebook.update_contact(id, |contact| draft.apply_to(contact));
        tracing::info!(id = %id, "Contact updated");
        Ok(())
    }

    /// Append a phone number to contact `id`.
    pub fn add_phone_number(
        &mut self,
        id: ContactId,
        phone_type: &str,
        number: &str,
    ) -> ServiceResult<()> {
        let normalized = self.check_phone(id, None, phone_type, number)?;
        self.phonebook
            .update_contact(id, |contact| contact.add_phone_number(phone_type, &normalized));
        tracing::debug!(id = %id, "Phone number added");
        Ok(())
    }

    /// Replace the phone number at `index` of contact `id`.
    ///
    /// The entry being edited does not count as a duplicate of itself, so
    /// relabelling a number keeps working.
    pub fn edit_phone_number(
        &mut self,
        id: ContactId,
        index: usize,
        phone_type: &str,
        number: &str,
    ) -> ServiceResult<()> {
        let normalized = self.check_phone(id, Some(index), phone_type, number)?;
        self.phonebook.update_contact(id, |contact| {
            contact.edit_phone_number(index, phone_type, &normalized)
        });
        tracing::debug!(id = %id, index, "Phone number edited");
        Ok(())
    }

    /// Remove the phone number at `index` of contact `id`. The last number
    /// of a contact cannot be removed.
    pub fn delete_phone_number(&mut self, id: ContactId, index: usize) -> ServiceResult<()> {
        let count = self.find_contact(id)?.phone_numbers().len();
        if index >= count {
            return Err(ServiceError::PhoneIndexOutOfRange { id, index });
        }
        if count == 1 {
            return Err(ServiceError::LastPhoneNumber(id));
        }
        self.phonebook
            .update_contact(id, |contact| contact.delete_phone_number(index));
        tracing::debug!(id = %id, index, "Phone number deleted");
        Ok(())
    }

    pub fn delete_contact(&mut self, id: ContactId) -> ServiceResult<()> {
        if !self.phonebook.delete_contact(id) {
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(id = %id, "Contact deleted");
        Ok(())
    }

    /// Field rules plus uniqueness against every contact except `owner`.
    fn check_draft(&self, draft: &ContactDraft, owner: ContactId) -> ServiceResult<()> {
        validate_draft(draft)?;

        let email = normalize_email(&draft.email);
        if !self.phonebook.is_email_unique(&email, owner) {
            return Err(ValidationError::DuplicateEmail(email).into());
        }

        for phone in &draft.phone_numbers {
            let number = normalize_phone_number(&phone.number);
            if !self.phonebook.is_phone_number_unique(&number, owner) {
                return Err(ValidationError::DuplicatePhoneNumber(number).into());
            }
        }
        Ok(())
    }

    /// Validate a phone for contact `id` and return its normalized number.
    /// `editing` names the entry being replaced, which is skipped in the
    /// contact's own duplicate check.
    fn check_phone(
        &self,
        id: ContactId,
        editing: Option<usize>,
        phone_type: &str,
        number: &str,
    ) -> ServiceResult<String> {
        let contact = self.find_contact(id)?;
        if let Some(index) = editing {
            if index >= contact.phone_numbers().len() {
                return Err(ServiceError::PhoneIndexOutOfRange { id, index });
            }
        }

        let normalized = validate_phone(phone_type, number)?;
        if !self.phonebook.is_phone_number_unique(&normalized, id) {
            return Err(ValidationError::DuplicatePhoneNumber(normalized).into());
        }

        let taken_here = contact
            .phone_numbers()
            .iter()
            .enumerate()
            .any(|(i, p)| Some(i) != editing && p.number == normalized);
        if taken_here {
            return Err(ValidationError::DuplicatePhoneNumber(normalized).into());
        }
        Ok(normalized)
    }
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService")
            .field("contacts", &self.phonebook.len())
            .field("next_id", &self.phonebook.next_id())
            .finish_non_exhaustive()
    }
}

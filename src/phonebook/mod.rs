//! In-memory contact collection.
//!
//! The [`Phonebook`] owns every contact, hands out ids, answers uniqueness
//! questions, and provides search, sort and reorder over its ordered list.
//!
//! # Id assignment
//!
//! `next_id` starts at 1. [`Phonebook::add_contact`] stamps the next id on
//! the incoming contact and bumps the counter; ids are never reused, even
//! after deletions. Once id `u32::MAX` has been handed out the counter is
//! exhausted and further adds are refused. A bulk load goes through
//! [`Phonebook::add_contact_from_storage`], which keeps persisted ids, and
//! must be followed by one call to [`Phonebook::initialize_next_id`].

pub mod search;
pub mod sort;

pub use search::{SearchCriteria, SearchField};
pub use sort::{SortCriterion, SortDirection, SortField};

use crate::domain::ContactId;
use crate::models::Contact;
use crate::validation::{normalize_email, normalize_phone_number};
use std::collections::HashSet;

/// Ordered collection of contacts plus the id counter.
#[derive(Debug, Clone)]
pub struct Phonebook {
    contacts: Vec<Contact>,
    next_id: Option<ContactId>,
}

impl Default for Phonebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Phonebook {
    /// Create an empty phonebook.
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: Some(ContactId::new(1)),
        }
    }

    /// Id the next [`add_contact`](Self::add_contact) call will assign, or
    /// `None` when no ids are left.
    pub fn next_id(&self) -> Option<ContactId> {
        self.next_id
    }

    /// Recompute the id counter: 1 when empty, otherwise the largest id + 1.
    pub fn initialize_next_id(&mut self) {
        self.next_id = self
            .contacts
            .iter()
            .map(Contact::id)
            .max()
            .map_or(Some(ContactId::new(1)), |id| id.next());
    }

    /// Append `contact` under a freshly assigned id, ignoring whatever id it
    /// carried, and return that id.
    ///
    /// Returns `None` without adding anything when the id counter is
    /// exhausted.
    pub fn add_contact(&mut self, mut contact: Contact) -> Option<ContactId> {
        let Some(id) = self.next_id else {
            tracing::warn!("No contact ids left, contact not added");
            return None;
        };
        contact.set_id(id);
        self.next_id = id.next();
        tracing::debug!(id = %id, "Contact added");
        self.contacts.push(contact);
        Some(id)
    }

    /// Append a contact loaded from storage as-is.
    ///
    /// Neither the id nor the counter is touched; call
    /// [`initialize_next_id`](Self::initialize_next_id) once the load is done.
    pub fn add_contact_from_storage(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Remove the contact with `id`. Returns whether one was found.
    pub fn delete_contact(&mut self, id: ContactId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.contacts.remove(idx);
                tracing::debug!(id = %id, "Contact deleted");
                true
            }
            None => false,
        }
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id() == id)
    }

    /// Look up a contact by id.
    pub fn find_contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    /// Look up a contact by id for in-place editing.
    ///
    /// Changes made through the returned reference are visible to every
    /// later read of this phonebook.
    pub fn find_contact_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id() == id)
    }

    /// Run `mutator` on the contact with `id`. Returns `None` if there is no
    /// such contact.
    pub fn update_contact<R>(
        &mut self,
        id: ContactId,
        mutator: impl FnOnce(&mut Contact) -> R,
    ) -> Option<R> {
        self.find_contact_mut(id).map(mutator)
    }

    /// Whether no contact other than `ignore_id` uses `email`.
    ///
    /// The email is normalized first, so the check ignores case and
    /// whitespace. Pass [`ContactId::UNASSIGNED`] to exclude nobody.
    pub fn is_email_unique(&self, email: &str, ignore_id: ContactId) -> bool {
        let email = normalize_email(email);
        !self
            .contacts
            .iter()
            .any(|c| c.id() != ignore_id && c.email() == email)
    }

    /// Whether no contact other than `ignore_id` holds `number`, compared in
    /// normalized form.
    pub fn is_phone_number_unique(&self, number: &str, ignore_id: ContactId) -> bool {
        let number = normalize_phone_number(number);
        !self
            .contacts
            .iter()
            .any(|c| c.id() != ignore_id && c.has_phone_number(&number))
    }

    /// Every contact, in the current order.
    pub fn get_all_contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Rebuild the collection to follow `ordered_ids`.
    ///
    /// This is a full replace: contacts whose ids are missing from
    /// `ordered_ids` are dropped. Unknown ids are skipped, and an id listed
    /// twice keeps only its first position.
    pub fn reorder_contacts(&mut self, ordered_ids: &[ContactId]) {
        let mut remaining = std::mem::take(&mut self.contacts);
        let mut placed = HashSet::new();
        let mut reordered = Vec::with_capacity(ordered_ids.len().min(remaining.len()));

        for &id in ordered_ids {
            if !placed.insert(id) {
                continue;
            }
            if let Some(idx) = remaining.iter().position(|c| c.id() == id) {
                reordered.push(remaining.swap_remove(idx));
            }
        }

        if !remaining.is_empty() {
            tracing::debug!(dropped = remaining.len(), "Reorder dropped unlisted contacts");
        }
        self.contacts = reordered;
    }
}

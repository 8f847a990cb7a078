//! Multi-key stable sorting.

use super::Phonebook;
use crate::models::Contact;
use std::cmp::Ordering;

/// Fields a sort criterion can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Surname,
    Forename,
    Patronymic,
    Address,
    Email,
    BirthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One level of a multi-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortCriterion {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Compare two contacts on this criterion's field, honouring direction.
    pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id().cmp(&b.id()),
            SortField::Surname => a.surname().cmp(b.surname()),
            SortField::Forename => a.forename().cmp(b.forename()),
            SortField::Patronymic => a.patronymic().cmp(b.patronymic()),
            SortField::Address => a.address().cmp(b.address()),
            SortField::Email => a.email().cmp(b.email()),
            SortField::BirthDate => a.birth_date().cmp(&b.birth_date()),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Compare on each criterion in turn; the first non-equal field decides.
fn compare_by(criteria: &[SortCriterion], a: &Contact, b: &Contact) -> Ordering {
    criteria
        .iter()
        .map(|criterion| criterion.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl Phonebook {
    /// Stable sort by `criteria`, most significant first.
    ///
    /// Contacts equal on every listed field keep their relative order. An
    /// empty list leaves the collection untouched. Strings compare
    /// byte-wise; birth dates compare chronologically with unset dates first.
    pub fn sort_contacts(&mut self, criteria: &[SortCriterion]) {
        if criteria.is_empty() {
            return;
        }
        self.contacts.sort_by(|a, b| compare_by(criteria, a, b));
        tracing::debug!(levels = criteria.len(), "Contacts sorted");
    }
}

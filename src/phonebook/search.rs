//! Field-targeted and free-text search over a phonebook.

use super::Phonebook;
use crate::models::Contact;
use crate::validation::{digits_only, normalize_email, search_digits, trim};
use std::collections::BTreeMap;

/// Fields a search criterion can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchField {
    Id,
    Forename,
    Surname,
    Patronymic,
    Address,
    Email,
    BirthDay,
    BirthMonth,
    BirthYear,
    Phone,
}

/// Criteria for [`Phonebook::search_contacts`]: one query per field,
/// combined with AND.
pub type SearchCriteria = BTreeMap<SearchField, String>;

fn contains_ignore_case(value: &str, lower_query: &str) -> bool {
    value.to_lowercase().contains(lower_query)
}

fn matches_component(component: u32, query: &str) -> bool {
    component != 0 && query.parse::<u32>().map_or(false, |q| q == component)
}

fn matches_phone_digits(contact: &Contact, digits: &str) -> bool {
    !digits.is_empty()
        && contact
            .phone_numbers()
            .iter()
            .any(|p| digits_only(&p.number).contains(digits))
}

/// Whether `contact` satisfies one criterion. `query` is already trimmed
/// and non-empty.
fn matches_field(contact: &Contact, field: SearchField, query: &str) -> bool {
    match field {
        SearchField::Id => query
            .parse::<u32>()
            .map_or(false, |id| contact.id().get() == id),
        SearchField::Surname => contains_ignore_case(contact.surname(), &query.to_lowercase()),
        SearchField::Forename => contains_ignore_case(contact.forename(), &query.to_lowercase()),
        SearchField::Patronymic => {
            contains_ignore_case(contact.patronymic(), &query.to_lowercase())
        }
        SearchField::Address => contains_ignore_case(contact.address(), &query.to_lowercase()),
        SearchField::Email => contact.email().contains(&normalize_email(query)),
        SearchField::BirthDay => matches_component(contact.birth_date().day, query),
        SearchField::BirthMonth => matches_component(contact.birth_date().month, query),
        SearchField::BirthYear => matches_component(contact.birth_date().year, query),
        SearchField::Phone => matches_phone_digits(contact, &search_digits(query)),
    }
}

impl Phonebook {
    /// Contacts matching every criterion, in collection order.
    ///
    /// Text fields match case-insensitive substrings; email matches a
    /// substring of the normalized query; id and birth date parts match
    /// exactly (an unset date part never matches); phone matches a digit
    /// substring with a leading `8` read as `7`. Criteria whose query is
    /// blank after trimming are ignored.
    pub fn search_contacts(&self, criteria: &SearchCriteria) -> Vec<Contact> {
        let active: Vec<(SearchField, &str)> = criteria
            .iter()
            .map(|(field, query)| (*field, trim(query)))
            .filter(|(_, query)| !query.is_empty())
            .collect();

        let found: Vec<Contact> = self
            .get_all_contacts()
            .iter()
            .filter(|contact| {
                active
                    .iter()
                    .all(|(field, query)| matches_field(contact, *field, query))
            })
            .cloned()
            .collect();

        tracing::debug!(
            criteria = active.len(),
            found = found.len(),
            "Search by criteria"
        );
        found
    }

    /// Contacts matching a single free-text query anywhere.
    ///
    /// A contact matches when the query appears in its id, in any text field
    /// or email (ignoring case), in the digits of any phone number, or in its
    /// birth date written as `day.month.year`. A blank query returns every
    /// contact.
    pub fn search_all_fields(&self, query: &str) -> Vec<Contact> {
        let query = trim(query);
        if query.is_empty() {
            return self.get_all_contacts().to_vec();
        }

        let lower_query = query.to_lowercase();
        let digits = search_digits(query);

        self.get_all_contacts()
            .iter()
            .filter(|contact| {
                contact.id().to_string().contains(query)
                    || [
                        contact.surname(),
                        contact.forename(),
                        contact.patronymic(),
                        contact.address(),
                        contact.email(),
                    ]
                    .iter()
                    .any(|value| contains_ignore_case(value, &lower_query))
                    || matches_phone_digits(contact, &digits)
                    || contact.birth_date().to_dotted().contains(query)
            })
            .cloned()
            .collect()
    }
}

//! Contact model representing one entry of the phonebook.

use crate::domain::{BirthDate, ContactId};
use crate::validation::{normalize_email, normalize_phone_number, trim};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A labelled phone number.
///
/// Inside a [`Contact`] the number is always normalized; inside a
/// [`ContactDraft`] both fields hold raw user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PhoneNumber {
    /// Free-text label such as "mobile" or "work"
    #[serde(rename = "type")]
    pub phone_type: String,

    /// The number itself
    pub number: String,
}

impl PhoneNumber {
    pub fn new(phone_type: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            phone_type: phone_type.into(),
            number: number.into(),
        }
    }
}

/// A contact in the phonebook.
///
/// This is a plain container: setters trim (and, for email and phone
/// numbers, normalize) their input but never reject it. Run input through
/// [`crate::validation`] first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Contact {
    id: ContactId,
    surname: String,
    forename: String,
    patronymic: String,
    address: String,
    birth_date: BirthDate,
    email: String,
    phone_numbers: Vec<PhoneNumber>,
}

impl Contact {
    /// Create an empty contact with an unassigned id.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn forename(&self) -> &str {
        &self.forename
    }

    /// Patronymic, empty when not specified.
    pub fn patronymic(&self) -> &str {
        &self.patronymic
    }

    /// Address, empty when not specified.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    /// Normalized email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_numbers(&self) -> &[PhoneNumber] {
        &self.phone_numbers
    }

    pub fn set_id(&mut self, id: ContactId) {
        self.id = id;
    }

    pub fn set_surname(&mut self, surname: &str) {
        self.surname = trim(surname).to_string();
    }

    pub fn set_forename(&mut self, forename: &str) {
        self.forename = trim(forename).to_string();
    }

    pub fn set_patronymic(&mut self, patronymic: &str) {
        self.patronymic = trim(patronymic).to_string();
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = trim(address).to_string();
    }

    pub fn set_birth_date(&mut self, birth_date: BirthDate) {
        self.birth_date = birth_date;
    }

    /// Store the normalized form of `email`.
    pub fn set_email(&mut self, email: &str) {
        self.email = normalize_email(email);
    }

    /// Append a phone number. Uniqueness is not checked here.
    pub fn add_phone_number(&mut self, phone_type: &str, number: &str) {
        self.phone_numbers.push(PhoneNumber::new(
            trim(phone_type),
            normalize_phone_number(number),
        ));
    }

    /// Remove the phone number at `idx`.
    ///
    /// Returns `false` without changing anything if `idx` is out of bounds or
    /// the number is the contact's last one.
    pub fn delete_phone_number(&mut self, idx: usize) -> bool {
        if self.phone_numbers.len() <= 1 || idx >= self.phone_numbers.len() {
            return false;
        }
        self.phone_numbers.remove(idx);
        true
    }

    /// Replace the phone number at `idx`. Returns `false` if out of bounds.
    pub fn edit_phone_number(&mut self, idx: usize, phone_type: &str, number: &str) -> bool {
        match self.phone_numbers.get_mut(idx) {
            Some(phone) => {
                phone.phone_type = trim(phone_type).to_string();
                phone.number = normalize_phone_number(number);
                true
            }
            None => false,
        }
    }

    /// Drop every phone number. Only meant as the first step of a full
    /// replace that re-adds numbers right away.
    pub fn clear_phone_numbers(&mut self) {
        self.phone_numbers.clear();
    }

    /// Whether this contact holds `number` (already normalized).
    pub fn has_phone_number(&self, number: &str) -> bool {
        self.phone_numbers.iter().any(|p| p.number == number)
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        "(not specified)"
    } else {
        value
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Surname: {}", self.surname)?;
        writeln!(f, "Forename: {}", self.forename)?;
        writeln!(f, "Patronymic: {}", or_unspecified(&self.patronymic))?;
        writeln!(f, "Address: {}", or_unspecified(&self.address))?;
        writeln!(f, "Birth date: {}", self.birth_date)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Phone numbers:")?;
        for phone in &self.phone_numbers {
            writeln!(f, "  {}: {}", phone.phone_type, phone.number)?;
        }
        Ok(())
    }
}

/// Raw, unvalidated field values for creating or replacing a contact.
///
/// Shells and loaders collect input into a draft, validate it with
/// [`crate::validation::validate_draft`], then turn it into a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub surname: String,
    pub forename: String,
    pub patronymic: String,
    pub address: String,
    pub birth_date: BirthDate,
    pub email: String,
    pub phone_numbers: Vec<PhoneNumber>,
}

impl ContactDraft {
    /// Create a draft with the mandatory text fields set.
    pub fn new(
        surname: impl Into<String>,
        forename: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            surname: surname.into(),
            forename: forename.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Append a phone number.
    pub fn with_phone(mut self, phone_type: impl Into<String>, number: impl Into<String>) -> Self {
        self.phone_numbers.push(PhoneNumber::new(phone_type, number));
        self
    }

    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = patronymic.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_birth_date(mut self, birth_date: BirthDate) -> Self {
        self.birth_date = birth_date;
        self
    }

    /// Overwrite every field of `contact` except its id, replacing the phone
    /// list wholesale.
    pub fn apply_to(self, contact: &mut Contact) {
        contact.set_surname(&self.surname);
        contact.set_forename(&self.forename);
        contact.set_patronymic(&self.patronymic);
        contact.set_address(&self.address);
        contact.set_birth_date(self.birth_date);
        contact.set_email(&self.email);
        contact.clear_phone_numbers();
        for phone in &self.phone_numbers {
            contact.add_phone_number(&phone.phone_type, &phone.number);
        }
    }

    /// Build a new contact with an unassigned id.
    pub fn into_contact(self) -> Contact {
        let mut contact = Contact::new();
        self.apply_to(&mut contact);
        contact
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            surname: contact.surname.clone(),
            forename: contact.forename.clone(),
            patronymic: contact.patronymic.clone(),
            address: contact.address.clone(),
            birth_date: contact.birth_date,
            email: contact.email.clone(),
            phone_numbers: contact.phone_numbers.clone(),
        }
    }
}

//! Field validation and normalization.
//!
//! Every function here is pure. Contacts themselves never reject data, so
//! each mutation entry point (the contact service, the storage loaders) runs
//! raw input through this module before touching a [`Contact`].
//!
//! Normalization is idempotent: normalizing an already normalized email or
//! phone number returns it unchanged.
//!
//! [`Contact`]: crate::models::Contact

mod date;
mod email;
mod phone;

pub use date::{is_valid_date, is_valid_date_on};
pub use email::{is_forename_in_email, is_valid_email, local_part, normalize_email};
pub use phone::{
    digits_only, is_valid_phone_number, is_valid_phone_type, normalize_phone_number,
    search_digits,
};

use crate::domain::{BirthDate, NameField, ValidationError};
use crate::models::ContactDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯёЁ]([a-zA-Zа-яА-ЯёЁ0-9\- ]*[a-zA-Zа-яА-ЯёЁ0-9])?$")
        .expect("Failed to compile name regex")
});

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯёЁ0-9\s\-,.#№()/\\_]+$").expect("Failed to compile address regex")
});

fn is_trimmable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Strip leading and trailing spaces, tabs, newlines, carriage returns,
/// form feeds and vertical tabs.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_trimmable)
}

/// Check a surname, forename or patronymic.
///
/// Names start with a Latin or Cyrillic letter and end with a letter or
/// digit; digits, spaces and hyphens may appear in between.
///
/// ```
/// use phonebook::validation::is_valid_name;
///
/// assert!(is_valid_name("Римский-Корсаков"));
/// assert!(!is_valid_name("-Ivan"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Check an address. Empty addresses are allowed.
pub fn is_valid_address(address: &str) -> bool {
    address.is_empty() || ADDRESS_RE.is_match(address)
}

fn check_name(field: NameField, value: &str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
        })
    }
}

/// Validate a birth date, accepting the unset sentinel.
pub fn validate_birth_date(date: &BirthDate) -> Result<(), ValidationError> {
    if date.is_unset() || is_valid_date(date.day, date.month, date.year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidBirthDate {
            day: date.day,
            month: date.month,
            year: date.year,
        })
    }
}

/// Validate a raw email against a forename and return its normalized form.
pub fn validate_email(email: &str, forename: &str) -> Result<String, ValidationError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail(email));
    }
    if !is_forename_in_email(&email, forename) {
        return Err(ValidationError::ForenameNotInEmail {
            email,
            forename: forename.to_string(),
        });
    }
    Ok(email)
}

/// Validate a raw type/number pair and return the normalized number.
pub fn validate_phone(kind: &str, number: &str) -> Result<String, ValidationError> {
    let kind = trim(kind);
    if !is_valid_phone_type(kind) {
        return Err(ValidationError::InvalidPhoneType(kind.to_string()));
    }
    let number = trim(number);
    if !is_valid_phone_number(number) {
        return Err(ValidationError::InvalidPhoneNumber(number.to_string()));
    }
    Ok(normalize_phone_number(number))
}

/// Validate every field of a draft, in field order, stopping at the first
/// failure.
///
/// Covers the rules that can be checked without looking at other contacts:
/// name patterns, address characters, birth date, email shape and forename,
/// at least one phone, and no number repeated within the draft. Uniqueness
/// against a phonebook is the caller's job.
pub fn validate_draft(draft: &ContactDraft) -> Result<(), ValidationError> {
    check_name(NameField::Surname, trim(&draft.surname))?;

    let forename = trim(&draft.forename);
    check_name(NameField::Forename, forename)?;

    let patronymic = trim(&draft.patronymic);
    if !patronymic.is_empty() {
        check_name(NameField::Patronymic, patronymic)?;
    }

    let address = trim(&draft.address);
    if !is_valid_address(address) {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }

    validate_birth_date(&draft.birth_date)?;
    validate_email(&draft.email, forename)?;

    if draft.phone_numbers.is_empty() {
        return Err(ValidationError::NoPhoneNumbers);
    }

    let mut seen = HashSet::new();
    for phone in &draft.phone_numbers {
        let normalized = validate_phone(&phone.phone_type, &phone.number)?;
        if !seen.insert(normalized.clone()) {
            return Err(ValidationError::DuplicatePhoneNumber(normalized));
        }
    }

    Ok(())
}

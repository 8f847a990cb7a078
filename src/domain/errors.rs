//! Domain validation errors.

use super::ContactId;
use std::fmt;

/// Contact fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Surname,
    Forename,
    Patronymic,
}

impl NameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surname => "surname",
            Self::Forename => "forename",
            Self::Patronymic => "patronymic",
        }
    }
}

/// Errors that can occur when validating contact data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Surname, forename or patronymic failed the name pattern.
    InvalidName { field: NameField, value: String },

    /// The address contains characters outside the permitted set.
    InvalidAddress(String),

    /// The birth date is not a real calendar date, is before 1900 or lies in the future.
    InvalidBirthDate { day: u32, month: u32, year: u32 },

    /// The email address is malformed.
    InvalidEmail(String),

    /// The local part of the email does not contain the forename.
    ForenameNotInEmail { email: String, forename: String },

    /// Another contact already uses this email.
    DuplicateEmail(String),

    /// The phone type label is empty or malformed.
    InvalidPhoneType(String),

    /// The phone number is not a Russian mobile number.
    InvalidPhoneNumber(String),

    /// The (normalized) phone number is already taken.
    DuplicatePhoneNumber(String),

    /// A contact needs at least one phone number.
    NoPhoneNumbers,

    /// A persisted id is not a positive integer.
    InvalidId(i64),

    /// Two persisted contacts share an id.
    DuplicateId(ContactId),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { field, value } => {
                write!(f, "Invalid {}: '{}'", field.as_str(), value)
            }
            Self::InvalidAddress(address) => write!(f, "Invalid address: '{}'", address),
            Self::InvalidBirthDate { day, month, year } => {
                write!(f, "Invalid birth date: {}.{}.{}", day, month, year)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::ForenameNotInEmail { email, forename } => write!(
                f,
                "Email {} does not contain the forename '{}'",
                email, forename
            ),
            Self::DuplicateEmail(email) => write!(f, "Email already in use: {}", email),
            Self::InvalidPhoneType(kind) => write!(f, "Invalid phone type: '{}'", kind),
            Self::InvalidPhoneNumber(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::DuplicatePhoneNumber(phone) => {
                write!(f, "Phone number already in use: {}", phone)
            }
            Self::NoPhoneNumbers => write!(f, "Contact must have at least one phone number"),
            Self::InvalidId(id) => write!(f, "ID must be a positive integer, got {}", id),
            Self::DuplicateId(id) => write!(f, "Duplicate ID: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}

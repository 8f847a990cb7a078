//! Domain value objects and types.
//!
//! This module contains small typed wrappers for the concepts a contact is
//! built from: its identifier, its birth date, and the errors raised when raw
//! field values fail validation.

pub mod birth_date;
pub mod contact_id;
pub mod errors;

pub use birth_date::BirthDate;
pub use contact_id::ContactId;
pub use errors::{NameField, ValidationError};

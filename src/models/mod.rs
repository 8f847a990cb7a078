//! Data models for phonebook entries.
//!
//! This module contains the contact record, its phone numbers, and the raw
//! draft a shell fills in before a contact is created or replaced.

pub mod contact;

pub use contact::{Contact, ContactDraft, PhoneNumber};

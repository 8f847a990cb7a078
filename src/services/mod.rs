//! Application service layer.
//!
//! Services validate raw input and orchestrate the phonebook and its
//! storage. They are the boundary shells (CLI, GUI) call into.

mod contact_service;

pub use contact_service::ContactService;

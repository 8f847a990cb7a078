//! Phonebook - Main entry point
//!
//! Loads the configured storage and prints contact cards: every contact, or
//! only those matching the free-text query given on the command line.

use anyhow::{Context, Result};
use phonebook::{open_storage, Config, ContactService, ServiceError, StorageError};
use std::io::ErrorKind;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Logs go to stderr so that stdout carries only contact cards
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        backend = config.storage.as_str(),
        path = %config.storage_path.display(),
        "Configuration loaded"
    );

    let storage = open_storage(config.storage, &config.storage_path)
        .with_context(|| format!("Failed to open {}", config.storage_path.display()))?;
    let mut service = ContactService::new(storage);

    match service.load() {
        Ok(count) => info!(count, "Contacts loaded"),
        Err(ServiceError::Storage(StorageError::Io { ref source, .. }))
            if source.kind() == ErrorKind::NotFound =>
        {
            warn!(
                path = %config.storage_path.display(),
                "No saved contacts yet, starting with an empty phonebook"
            );
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to load contacts")),
    }

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let contacts = if query.trim().is_empty() {
        service.phonebook().get_all_contacts().to_vec()
    } else {
        service.phonebook().search_all_fields(&query)
    };

    if contacts.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }

    for contact in &contacts {
        println!("{}", contact);
    }
    Ok(())
}

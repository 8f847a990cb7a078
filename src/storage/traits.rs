use crate::error::StorageResult;
use crate::models::Contact;

/// Load/save contract for phonebook persistence.
///
/// Enables different implementations (delimited text file, JSON file,
/// SQLite, in-memory mocks) behind one interface.
pub trait ContactStorage {
    /// Read every persisted contact, keeping their stored ids.
    ///
    /// A failure yields no contacts at all; the reason is also available
    /// from [`last_error`](Self::last_error) until the next call.
    fn load(&mut self) -> StorageResult<Vec<Contact>>;

    /// Replace the persisted collection with `contacts`, all-or-nothing.
    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()>;

    /// Description of the failure of the most recent load or save, if it
    /// failed.
    fn last_error(&self) -> Option<&str>;
}

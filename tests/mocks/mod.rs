//! In-memory test doubles.

mod mock_storage;

pub use mock_storage::MockContactStorage;

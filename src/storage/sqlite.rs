//! SQLite storage.
//!
//! Contacts live in a `contacts` table and their numbers in `phones`, which
//! references `contacts(id)` with cascading deletes. The schema version is
//! mirrored to `PRAGMA user_version`; opening a database runs every pending
//! migration before any data is touched.

use super::loader::RecordValidator;
use super::{ContactStorage, LastError};
use crate::domain::BirthDate;
use crate::error::{StorageError, StorageResult};
use crate::models::{Contact, ContactDraft, PhoneNumber};
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_init.sql"),
}];

/// Latest schema version this build knows how to write.
pub fn latest_schema_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_schema_version();

    if current > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            found: current,
            supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    tracing::info!(from = current, to = latest, "Applied schema migrations");
    Ok(())
}

fn bootstrap(conn: &mut Connection) -> StorageResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)
}

/// One `contacts` row as read, before validation.
struct ContactRow {
    id: i64,
    surname: String,
    forename: String,
    patronymic: Option<String>,
    address: Option<String>,
    birth: [Option<i64>; 3],
    email: String,
}

fn date_component(location: &str, name: &str, value: Option<i64>) -> StorageResult<u32> {
    u32::try_from(value.unwrap_or(0))
        .map_err(|_| StorageError::malformed(location, format!("{} is out of range", name)))
}

/// Storage backed by a SQLite database.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
    last_error: LastError,
}

impl SqliteStorage {
    /// Open (creating if needed) the database file at `path` and bring its
    /// schema up to date.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let mut conn = Connection::open(path.as_ref())?;
        bootstrap(&mut conn)?;
        tracing::info!(
            path = %path.as_ref().display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Opened SQLite database"
        );
        Ok(Self {
            conn,
            last_error: LastError::default(),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        let mut conn = Connection::open_in_memory()?;
        bootstrap(&mut conn)?;
        Ok(Self {
            conn,
            last_error: LastError::default(),
        })
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> StorageResult<u32> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn read_all(&self) -> StorageResult<Vec<Contact>> {
        let started_at = Instant::now();

        let mut stmt = self.conn.prepare(
            "SELECT id, surname, forename, patronymic, address, \
                    birth_day, birth_month, birth_year, email \
             FROM contacts ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ContactRow {
                    id: row.get(0)?,
                    surname: row.get(1)?,
                    forename: row.get(2)?,
                    patronymic: row.get(3)?,
                    address: row.get(4)?,
                    birth: [row.get(5)?, row.get(6)?, row.get(7)?],
                    email: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut phones_stmt = self
            .conn
            .prepare("SELECT type, number FROM phones WHERE contact_id = ?1 ORDER BY id")?;

        let mut validator = RecordValidator::new();
        let mut contacts = Vec::with_capacity(rows.len());
        for row in rows {
            let location = format!("Contact ID {}", row.id);
            let phone_numbers = phones_stmt
                .query_map(params![row.id], |r| {
                    Ok(PhoneNumber::new(r.get::<_, String>(0)?, r.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            let [day, month, year] = row.birth;
            let draft = ContactDraft {
                surname: row.surname,
                forename: row.forename,
                patronymic: row.patronymic.unwrap_or_default(),
                address: row.address.unwrap_or_default(),
                birth_date: BirthDate::new(
                    date_component(&location, "birth_day", day)?,
                    date_component(&location, "birth_month", month)?,
                    date_component(&location, "birth_year", year)?,
                ),
                email: row.email,
                phone_numbers,
            };

            let contact = validator
                .accept(row.id, draft)
                .map_err(|source| StorageError::InvalidRecord { location, source })?;
            contacts.push(contact);
        }

        tracing::info!(
            count = contacts.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Loaded contacts from SQLite"
        );
        Ok(contacts)
    }

    fn write_all(&mut self, contacts: &[Contact]) -> StorageResult<()> {
        let started_at = Instant::now();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM phones", [])?;
        tx.execute("DELETE FROM contacts", [])?;
        {
            let mut insert_contact = tx.prepare(
                "INSERT INTO contacts (id, surname, forename, patronymic, address, \
                                       birth_day, birth_month, birth_year, email) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            let mut insert_phone = tx
                .prepare("INSERT INTO phones (contact_id, type, number) VALUES (?1, ?2, ?3)")?;

            for contact in contacts {
                let date = contact.birth_date();
                insert_contact.execute(params![
                    contact.id().get(),
                    contact.surname(),
                    contact.forename(),
                    contact.patronymic(),
                    contact.address(),
                    date.day,
                    date.month,
                    date.year,
                    contact.email(),
                ])?;
                for phone in contact.phone_numbers() {
                    insert_phone.execute(params![contact.id().get(), phone.phone_type, phone.number])?;
                }
            }
        }
        // Dropping `tx` on any early return above rolls everything back.
        tx.commit()?;

        tracing::info!(
            count = contacts.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Saved contacts to SQLite"
        );
        Ok(())
    }
}

impl ContactStorage for SqliteStorage {
    fn load(&mut self) -> StorageResult<Vec<Contact>> {
        self.last_error.reset();
        let result = self.read_all();
        self.last_error.record(result)
    }

    fn save(&mut self, contacts: &[Contact]) -> StorageResult<()> {
        self.last_error.reset();
        let result = self.write_all(contacts);
        self.last_error.record(result)
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactId, ValidationError};

    fn contact(id: u32, forename: &str, phone: &str) -> Contact {
        let mut contact = ContactDraft::new("Petrov", forename, format!("{}@mail.com", forename))
            .with_phone("mobile", phone)
            .into_contact();
        contact.set_id(ContactId::new(id));
        contact
    }

    #[test]
    fn test_open_applies_migrations() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.schema_version().unwrap(), latest_schema_version());
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        }
        assert!(matches!(
            SqliteStorage::open(&path),
            Err(StorageError::UnsupportedSchemaVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let mut first = contact(4, "ivan", "89161234567");
        first.add_phone_number("work", "84950000000");
        first.set_birth_date(BirthDate::new(1, 2, 1990));
        let contacts = vec![first, contact(2, "anna", "89031112233")];

        storage.save(&contacts).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.len(), 2);
        // Loaded in id order.
        assert_eq!(loaded[0], contacts[1]);
        assert_eq!(loaded[1], contacts[0]);
        assert_eq!(loaded[1].phone_numbers()[1].phone_type, "work");
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .save(&[contact(1, "ivan", "89161234567"), contact(2, "anna", "89031112233")])
            .unwrap();
        storage.save(&[contact(3, "oleg", "89160000000")]).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), ContactId::new(3));
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.save(&[contact(1, "ivan", "89161234567")]).unwrap();

        // Same primary key twice makes the second insert fail.
        let result = storage.save(&[
            contact(5, "anna", "89031112233"),
            contact(5, "oleg", "89160000000"),
        ]);
        assert!(matches!(result, Err(StorageError::Database(_))));
        assert!(storage.last_error().is_some());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].forename(), "ivan");
        assert!(storage.last_error().is_none());
    }

    #[test]
    fn test_invalid_rows_abort_load() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.conn
            .execute_batch(
                "INSERT INTO contacts (id, surname, forename, email) VALUES (1, 'Petrov', 'Ivan', 'ivan@mail.com');",
            )
            .unwrap();

        let err = storage.load().unwrap_err();
        match err {
            StorageError::InvalidRecord { location, source } => {
                assert_eq!(location, "Contact ID 1");
                assert_eq!(source, ValidationError::NoPhoneNumbers);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

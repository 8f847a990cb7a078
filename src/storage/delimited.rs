//! Line-oriented text storage.
//!
//! One contact per line, ten `;`-separated columns:
//!
//! ```text
//! id;surname;forename;patronymic;address;day;month;year;email;type:number|type:number
//! ```
//!
//! An unset birth date is written as `0;0;0`. The field rules keep `;`, `|`
//! and `:` out of every column. Addresses may contain line breaks, so that
//! column escapes `\` as `\\`, a newline as `\n` and a carriage return as
//! `\r`. Any other backslash sequence is read back literally.

use super::loader::RecordValidator;
use super::{write_atomically, ContactStorage, LastError};
use crate::domain::BirthDate;
use crate::error::{StorageError, StorageResult};
use crate::models::{Contact, ContactDraft, PhoneNumber};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

const COLUMNS: usize = 10;

/// Storage backed by a delimited text file.
#[derive(Debug)]
pub struct DelimitedFileStorage {
    path: PathBuf,
    last_error: LastError,
}

impl DelimitedFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last_error: LastError::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<Vec<Contact>> {
        let started_at = Instant::now();
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let contacts = parse_contacts(&text)?;
        tracing::info!(
            path = %self.path.display(),
            count = contacts.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Loaded contacts from delimited file"
        );
        Ok(contacts)
    }

    fn write_all(&self, contacts: &[Contact]) -> StorageResult<()> {
        let path = &self.path;
        write_atomically(path, |out| {
            for contact in contacts {
                writeln!(out, "{}", format_line(contact)).map_err(|e| StorageError::io(path, e))?;
            }
            Ok(())
        })?;
        tracing::info!(
            path = %path.display(),
            count = contacts.len(),
            "Saved contacts to delimited file"
        );
        Ok(())
    }
}

impl ContactStorage for DelimitedFileStorage {
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

/// Parse a whole document, validating every record.
pub(crate) fn parse_contacts(text: &str) -> StorageResult<Vec<Contact>> {
    let mut validator = RecordValidator::new();
    let mut contacts = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let location = format!("Line {}", idx + 1);
        let (id, draft) =
            parse_line(line).map_err(|reason| StorageError::malformed(&location, reason))?;
        let contact = validator
            .accept(id, draft)
            .map_err(|source| StorageError::InvalidRecord { location, source })?;
        contacts.push(contact);
    }

    Ok(contacts)
}

fn parse_number<T: std::str::FromStr>(column: &str, what: &str) -> Result<T, String> {
    column
        .trim()
        .parse()
        .map_err(|_| format!("{} is not a number: '{}'", what, column))
}

/// Split one line into its raw id and draft. Only structural problems are
/// reported here; field rules are checked by the loader.
fn parse_line(line: &str) -> Result<(i64, ContactDraft), String> {
    let parts: Vec<&str> = line.split(';').collect();
    if parts.len() < COLUMNS {
        return Err(format!(
            "not enough columns (expected {}, found {})",
            COLUMNS,
            parts.len()
        ));
    }

    let id: i64 = parse_number(parts[0], "ID")?;
    let birth_date = BirthDate::new(
        parse_number(parts[5], "Birth day")?,
        parse_number(parts[6], "Birth month")?,
        parse_number(parts[7], "Birth year")?,
    );

    let mut phone_numbers = Vec::new();
    if !parts[9].is_empty() {
        for entry in parts[9].split('|') {
            let (phone_type, number) = entry
                .split_once(':')
                .ok_or_else(|| format!("phone entry without type separator: '{}'", entry))?;
            phone_numbers.push(PhoneNumber::new(phone_type, number));
        }
    }

    let draft = ContactDraft {
        surname: parts[1].to_string(),
        forename: parts[2].to_string(),
        patronymic: parts[3].to_string(),
        address: unescape_address(parts[4]),
        birth_date,
        email: parts[8].to_string(),
        phone_numbers,
    };
    Ok((id, draft))
}

/// Render one contact as a line, without the trailing newline.
pub(crate) fn format_line(contact: &Contact) -> String {
    let date = contact.birth_date();
    let phones = contact
        .phone_numbers()
        .iter()
        .map(|p| format!("{}:{}", p.phone_type, p.number))
        .collect::<Vec<_>>()
        .join("|");

    format!(
        "{};{};{};{};{};{};{};{};{};{}",
        contact.id(),
        contact.surname(),
        contact.forename(),
        contact.patronymic(),
        escape_address(contact.address()),
        date.day,
        date.month,
        date.year,
        contact.email(),
        phones
    )
}

fn escape_address(address: &str) -> String {
    let mut out = String::with_capacity(address.len());
    for ch in address.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_address(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut chars = column.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

//! ContactId value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a contact inside a phonebook.
///
/// Real contacts always carry a positive id. The zero value is reserved for
/// contacts that have not been added to a phonebook yet, and doubles as the
/// "exclude nobody" marker in uniqueness checks.
///
/// # Example
///
/// ```
/// use phonebook::domain::ContactId;
///
/// let id = ContactId::new(42);
/// assert!(id.is_assigned());
/// assert_eq!(id.to_string(), "42");
/// assert!(!ContactId::UNASSIGNED.is_assigned());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(u32);

impl ContactId {
    /// Id of a contact that has not been added to a phonebook.
    pub const UNASSIGNED: ContactId = ContactId(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Whether this id was handed out by a phonebook (or loaded from storage).
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` once `u32::MAX` is reached.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u32> for ContactId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_id_unassigned() {
        assert_eq!(ContactId::default(), ContactId::UNASSIGNED);
        assert!(!ContactId::UNASSIGNED.is_assigned());
        assert!(ContactId::new(1).is_assigned());
    }

    #[test]
    fn test_contact_id_next() {
        assert_eq!(ContactId::new(9).next(), Some(ContactId::new(10)));
        assert_eq!(ContactId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_contact_id_parse() {
        assert_eq!("15".parse::<ContactId>().unwrap(), ContactId::new(15));
        assert!("abc".parse::<ContactId>().is_err());
        assert!("-3".parse::<ContactId>().is_err());
    }

    #[test]
    fn test_contact_id_serialization() {
        let json = serde_json::to_string(&ContactId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: ContactId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }
}

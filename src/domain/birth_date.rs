//! BirthDate value object.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A day/month/year triple.
///
/// The all-zero value means "not specified". Any other value is expected to
/// have passed [`crate::validation::is_valid_date`] before it reaches a contact.
/// Dates order chronologically (year, then month, then day), so the unset
/// value sorts before every real date. Missing parts deserialize as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthDate {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl BirthDate {
    /// The "not specified" date.
    pub const UNSET: BirthDate = BirthDate {
        day: 0,
        month: 0,
        year: 0,
    };

    pub const fn new(day: u32, month: u32, year: u32) -> Self {
        Self { day, month, year }
    }

    pub fn is_unset(&self) -> bool {
        self.day == 0 && self.month == 0 && self.year == 0
    }

    /// Unpadded `day.month.year`, the form free-text search matches against.
    pub fn to_dotted(&self) -> String {
        format!("{}.{}.{}", self.day, self.month, self.year)
    }
}

impl Ord for BirthDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for BirthDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            write!(f, "(not specified)")
        } else {
            write!(f, "{:02}.{:02}.{}", self.day, self.month, self.year)
        }
    }
}

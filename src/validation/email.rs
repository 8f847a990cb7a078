//! Email address rules.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Check for a `local@domain.tld` address with a single-label domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strip every whitespace character and lowercase the rest.
///
/// ```
/// use phonebook::validation::normalize_email;
///
/// assert_eq!(normalize_email(" Ivan @Mail.COM "), "ivan@mail.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Part of a normalized address before the first `@` (the whole string if
/// there is none).
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Whether the local part of `email` contains `forename`, ignoring case.
pub fn is_forename_in_email(email: &str, forename: &str) -> bool {
    let email = normalize_email(email);
    local_part(&email).contains(&forename.to_lowercase())
}

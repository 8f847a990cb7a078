//! Phone number and phone type rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// Russian mobile number: `+7` or `8`, optional space, area code with
/// optional parentheses, then 3-2-2 digit groups with optional hyphens.
static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+7|8) ?\(?[0-9]{3}\)? ?[0-9]{3}(-?[0-9]{2}){2}$")
        .expect("Failed to compile phone number regex")
});

static PHONE_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯёЁ0-9]([a-zA-Zа-яА-ЯёЁ0-9 ]*[a-zA-Zа-яА-ЯёЁ0-9])?$")
        .expect("Failed to compile phone type regex")
});

const SIGNIFICANT_DIGITS: usize = 11;

/// Check a phone type label such as "mobile" or "work 2".
///
/// The label must start and end with a letter or digit; spaces are allowed
/// in between.
pub fn is_valid_phone_type(kind: &str) -> bool {
    !kind.is_empty() && PHONE_TYPE_RE.is_match(kind)
}

/// Check that `phone` is written as a Russian mobile number.
///
/// ```
/// use phonebook::validation::is_valid_phone_number;
///
/// assert!(is_valid_phone_number("+7 (916) 123-45-67"));
/// assert!(is_valid_phone_number("89161234567"));
/// assert!(!is_valid_phone_number("916 123 45 67"));
/// ```
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_NUMBER_RE.is_match(phone)
}

/// Keep only the ASCII digits of `s`.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Canonicalize a phone number to `+7 (XXX) XXX-XX-XX`.
///
/// A leading trunk prefix `8` is rewritten to the country code `7`. Inputs
/// that do not reduce to 11 digits starting with `7` come back as their bare
/// digit string; callers validate before normalizing.
///
/// ```
/// use phonebook::validation::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("8 916 123 45 67"), "+7 (916) 123-45-67");
/// assert_eq!(normalize_phone_number("12-34"), "1234");
/// ```
pub fn normalize_phone_number(phone: &str) -> String {
    let mut digits = digits_only(phone);

    if digits.len() == SIGNIFICANT_DIGITS && digits.starts_with('8') {
        digits.replace_range(0..1, "7");
    }

    if digits.len() == SIGNIFICANT_DIGITS && digits.starts_with('7') {
        return format!(
            "+7 ({}) {}-{}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..9],
            &digits[9..11]
        );
    }

    digits
}

/// Digits of a search query with a leading `8` read as the country code.
///
/// Unlike [`normalize_phone_number`] this applies to partial numbers too, so
/// "8916" finds `+7 (916) ...`.
pub fn search_digits(query: &str) -> String {
    let mut digits = digits_only(query);
    if digits.starts_with('8') {
        digits.replace_range(0..1, "7");
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_formats() {
        assert!(is_valid_phone_number("+7 (916) 123-45-67"));
        assert!(is_valid_phone_number("+79161234567"));
        assert!(is_valid_phone_number("8 916 1234567"));
        assert!(is_valid_phone_number("8(916)123-4567"));
        assert!(is_valid_phone_number("89161234567"));
    }

    #[test]
    fn test_phone_number_rejects_malformed() {
        assert!(!is_valid_phone_number(""));
        assert!(!is_valid_phone_number("9161234567"));
        assert!(!is_valid_phone_number("+1 (916) 123-45-67"));
        assert!(!is_valid_phone_number("+7 (916) 123-45-6"));
        assert!(!is_valid_phone_number("+7 (916) 123--45-67"));
        assert!(!is_valid_phone_number("8 916 123 45 67"));
        assert!(!is_valid_phone_number("+7 (916) 123-45-678"));
    }

    #[test]
    fn test_phone_type() {
        assert!(is_valid_phone_type("mobile"));
        assert!(is_valid_phone_type("work 2"));
        assert!(is_valid_phone_type("2"));
        assert!(is_valid_phone_type("Домашний"));
        assert!(!is_valid_phone_type(""));
        assert!(!is_valid_phone_type(" mobile"));
        assert!(!is_valid_phone_type("home-office"));
    }

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("89161234567"), "+7 (916) 123-45-67");
        assert_eq!(normalize_phone_number("+7(916)1234567"), "+7 (916) 123-45-67");
        assert_eq!(
            normalize_phone_number("+7 (916) 123-45-67"),
            "+7 (916) 123-45-67"
        );
    }

    #[test]
    fn test_normalize_phone_number_idempotent() {
        for raw in ["89161234567", "+7 916 123-45-67", "8(495)000-00-00"] {
            let once = normalize_phone_number(raw);
            assert_eq!(normalize_phone_number(&once), once);
        }
    }

    #[test]
    fn test_normalize_phone_number_passthrough() {
        assert_eq!(normalize_phone_number("123"), "123");
        assert_eq!(normalize_phone_number("+1 (555) 123-4567"), "15551234567");
        assert_eq!(normalize_phone_number("no digits"), "");
    }

    #[test]
    fn test_search_digits() {
        assert_eq!(search_digits("8 916"), "7916");
        assert_eq!(search_digits("(916)"), "916");
        assert_eq!(search_digits("abc"), "");
    }
}

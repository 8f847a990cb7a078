//! Test fixtures and sample data.
//!
//! Reusable drafts and contacts for integration tests. Every sample is valid
//! and distinct from the others, so any subset can share a phonebook.

use phonebook::{BirthDate, Contact, ContactDraft, ContactId};

/// Create a draft with the required fields and one mobile number.
///
/// The email is derived from the forename so that it passes the
/// forename-in-email rule.
pub fn sample_draft(surname: &str, forename: &str, phone: &str) -> ContactDraft {
    ContactDraft::new(
        surname,
        forename,
        format!("{}.{}@mail.com", forename.to_lowercase(), surname.to_lowercase()),
    )
    .with_phone("mobile", phone)
}

/// Create a stored contact carrying `id`.
#[allow(dead_code)]
pub fn sample_contact(id: u32, surname: &str, forename: &str, phone: &str) -> Contact {
    let mut contact = sample_draft(surname, forename, phone).into_contact();
    contact.set_id(ContactId::new(id));
    contact
}

/// A small, varied set of drafts: Cyrillic and Latin names, optional fields
/// both set and unset, multiple numbers.
#[allow(dead_code)]
pub fn sample_drafts() -> Vec<ContactDraft> {
    vec![
        sample_draft("Petrov", "Ivan", "89161234567")
            .with_patronymic("Sergeevich")
            .with_address("Moscow, Tverskaya st. 1")
            .with_birth_date(BirthDate::new(12, 4, 1985))
            .with_phone("work", "+7 (495) 111-22-33"),
        sample_draft("Sidorova", "Anna", "+7 903 7654321")
            .with_birth_date(BirthDate::new(1, 12, 1990)),
        ContactDraft::new("Иванов", "Petr", "petr@mail.ru")
            .with_address("Казань, ул. Баумана №5")
            .with_phone("домашний", "8 (843) 555-66-77"),
        sample_draft("Adams", "Zoe", "89260000001").with_birth_date(BirthDate::new(12, 4, 1985)),
    ]
}

/// A draft whose optional fields use the unusual characters their rules
/// still allow: a tab, a line break, a backslash and the other address
/// punctuation, a hyphenated surname with Ё, and Cyrillic phone labels.
#[allow(dead_code)]
pub fn edge_case_draft() -> ContactDraft {
    ContactDraft::new("Кузнецова-Ёлкина", "Olga", "olga_k-1.x@mail.ru")
        .with_patronymic("Сергеевна")
        .with_address("Moscow\tул. Ленина #5, №7 (корп. 2)/3\\a_b\nкв. 9")
        .with_birth_date(BirthDate::new(29, 2, 2000))
        .with_phone("рабочий телефон", "+7(916)000-00-09")
        .with_phone("Ёлка 2", "8 916 0000010")
}

//! Behavioural tests for the phonebook core: uniqueness, search, sort,
//! reorder and phone list rules, driven through the public API.

mod fixtures;

use fixtures::*;
use phonebook::validation::{is_valid_phone_number, normalize_phone_number};
use phonebook::{
    ContactDraft, ContactId, Phonebook, SearchCriteria, SearchField, SortCriterion, SortField,
};

fn ids(contacts: &[phonebook::Contact]) -> Vec<u32> {
    contacts.iter().map(|c| c.id().get()).collect()
}

fn sample_book() -> Phonebook {
    let mut book = Phonebook::new();
    for draft in sample_drafts() {
        book.add_contact(draft.into_contact());
    }
    book
}

#[test]
fn test_normalize_phone_number_is_idempotent() {
    for raw in [
        "89161234567",
        "+79161234567",
        "8 (916) 123-45-67",
        "+7 916 1234567",
        "8(495)000-00-00",
    ] {
        assert!(is_valid_phone_number(raw), "{raw} should be valid");
        let once = normalize_phone_number(raw);
        assert_eq!(normalize_phone_number(&once), once);
        assert!(is_valid_phone_number(&once));
    }
}

#[test]
fn test_delete_phone_number_never_empties_the_list() {
    let mut book = sample_book();
    let id = ContactId::new(1);

    for _ in 0..5 {
        book.update_contact(id, |c| c.delete_phone_number(0));
    }
    assert_eq!(book.find_contact(id).unwrap().phone_numbers().len(), 1);
}

#[test]
fn test_email_uniqueness_ignores_case() {
    let mut book = Phonebook::new();
    let contact = ContactDraft::new("Bee", "A", "a@b.com")
        .with_phone("mobile", "89161234567")
        .into_contact();
    let id = book.add_contact(contact).unwrap();

    assert!(!book.is_email_unique("A@B.com", ContactId::UNASSIGNED));
    assert!(book.is_email_unique("A@B.com", id));
}

#[test]
fn test_duplicate_email_and_phone_scenario() {
    let mut book = Phonebook::new();
    book.add_contact(
        ContactDraft::new("Petrov", "Ivan", "ivan@mail.com")
            .with_phone("mobile", "+7 (916) 123-45-67")
            .into_contact(),
    );

    assert!(!book.is_email_unique("IVAN@MAIL.COM", ContactId::UNASSIGNED));
    assert!(!book.is_phone_number_unique("8 916 123 45 67", ContactId::UNASSIGNED));
    assert!(book.is_phone_number_unique("8 916 123 45 68", ContactId::UNASSIGNED));
}

#[test]
fn test_sort_by_surname_is_stable_and_idempotent() {
    let mut book = Phonebook::new();
    for (forename, phone) in [("Ivan", "89160000001"), ("Anna", "89160000002"), ("Oleg", "89160000003")] {
        book.add_contact(sample_draft("Petrov", forename, phone).into_contact());
    }
    book.add_contact(sample_draft("Adams", "Zoe", "89160000004").into_contact());

    let criteria = [SortCriterion::ascending(SortField::Surname)];
    book.sort_contacts(&criteria);
    let first = ids(book.get_all_contacts());
    assert_eq!(first, vec![4, 1, 2, 3]);

    book.sort_contacts(&criteria);
    assert_eq!(ids(book.get_all_contacts()), first);
}

#[test]
fn test_multi_key_sort() {
    let mut book = sample_book();
    // Ivan and Zoe share a birth date; surname breaks the tie descending.
    book.sort_contacts(&[
        SortCriterion::descending(SortField::BirthDate),
        SortCriterion::descending(SortField::Surname),
    ]);
    assert_eq!(ids(book.get_all_contacts()), vec![2, 1, 4, 3]);
}

#[test]
fn test_search_phone_with_leading_eight() {
    let book = sample_book();
    let mut criteria = SearchCriteria::new();
    criteria.insert(SearchField::Phone, "89161234567".to_string());

    assert_eq!(ids(&book.search_contacts(&criteria)), vec![1]);
}

#[test]
fn test_search_criteria_are_combined() {
    let book = sample_book();
    let mut criteria = SearchCriteria::new();
    criteria.insert(SearchField::BirthDay, "12".to_string());
    criteria.insert(SearchField::BirthYear, "1985".to_string());
    assert_eq!(ids(&book.search_contacts(&criteria)), vec![1, 4]);

    criteria.insert(SearchField::Surname, "ADA".to_string());
    assert_eq!(ids(&book.search_contacts(&criteria)), vec![4]);

    criteria.insert(SearchField::Email, "   ".to_string());
    assert_eq!(ids(&book.search_contacts(&criteria)), vec![4]);
}

#[test]
fn test_search_all_fields() {
    let book = sample_book();
    assert_eq!(ids(&book.search_all_fields("  ")), vec![1, 2, 3, 4]);
    assert_eq!(ids(&book.search_all_fields("казань")), vec![3]);
    assert_eq!(ids(&book.search_all_fields("12.4.1985")), vec![1, 4]);
    assert_eq!(ids(&book.search_all_fields("8843")), vec![3]);
    assert_eq!(ids(&book.search_all_fields("SIDOROVA")), vec![2]);
}

#[test]
fn test_reorder_drops_unlisted_contacts() {
    let mut book = Phonebook::new();
    for (forename, phone) in [("Ivan", "89160000001"), ("Anna", "89160000002"), ("Oleg", "89160000003")] {
        book.add_contact(sample_draft("Petrov", forename, phone).into_contact());
    }

    book.reorder_contacts(&[ContactId::new(3), ContactId::new(1)]);
    assert_eq!(ids(book.get_all_contacts()), vec![3, 1]);
    assert!(book.find_contact(ContactId::new(2)).is_none());
}

#[test]
fn test_ids_are_not_reused() {
    let mut book = sample_book();
    assert!(book.delete_contact(ContactId::new(4)));
    let id = book.add_contact(sample_draft("Orlov", "Oleg", "89169999999").into_contact());
    assert_eq!(id, Some(ContactId::new(5)));

    book.initialize_next_id();
    assert_eq!(book.next_id(), Some(ContactId::new(6)));
}

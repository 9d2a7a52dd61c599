//! Contact operations through the façade, backed by mock repositories.

mod mocks;

use chrono::NaiveDate;
use mocks::mock_operations;
use personal_assistant::domain::validate_phone;
use personal_assistant::{Config, ContactEdit};

fn phones(values: &[&str]) -> Vec<String> {
    values.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_phone_validation_accepts_exactly_ten_digits() {
    for len in 0..=12 {
        let candidate: String = "0123456789012".chars().take(len).collect();
        assert_eq!(
            validate_phone(&candidate).is_ok(),
            len == 10,
            "length {} gave the wrong verdict",
            len
        );
    }

    for bad in [
        "123-456-7890",
        "(123)4567890",
        "12345 67890",
        "+123456789",
        "123456789a",
        "１２３４５６７８９０",
        " 1234567890",
    ] {
        assert!(validate_phone(bad).is_err(), "{} should be rejected", bad);
    }
}

#[test]
fn test_add_then_search_finds_contact() {
    let (mut ops, contacts, _notes) = mock_operations(Config::default());

    let added = ops.add_contact("Alice", &phones(&["1234567890"]), None);
    assert!(added.success, "{}", added.message);
    assert_eq!(contacts.get_call_count("save"), 1);

    let found = ops.search_contacts("ali");
    assert!(found.success);
    let names: Vec<_> = found
        .data
        .unwrap()
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Alice"]);
}

#[test]
fn test_duplicate_add_does_not_touch_existing_record() {
    let (mut ops, contacts, _notes) = mock_operations(Config::default());
    ops.add_contact("Alice", &phones(&["1234567890"]), Some("05.05.1985"));
    let before = contacts.stored();

    let again = ops.add_contact("Alice", &phones(&["1111111111"]), None);
    assert!(!again.success);
    assert!(again.data.is_none());

    assert_eq!(contacts.stored(), before);
    assert_eq!(contacts.get_call_count("save"), 1);
    let alice = ops.contact_details("Alice").data.unwrap();
    assert_eq!(alice.phones.len(), 1);
    assert_eq!(alice.birthday.unwrap().to_string(), "05.05.1985");
}

#[test]
fn test_invalid_input_saves_nothing() {
    let (mut ops, contacts, _notes) = mock_operations(Config::default());
    assert!(!ops.add_contact("Bob", &phones(&["123"]), None).success);
    assert!(!ops.add_contact("Bob", &[], Some("1990-01-01")).success);
    assert!(!ops.add_contact("", &[], None).success);
    assert_eq!(contacts.get_call_count("save"), 0);
    assert!(ops.all_contacts().data.unwrap().is_empty());
}

#[test]
fn test_edit_flow() {
    let (mut ops, contacts, _notes) = mock_operations(Config::default());
    ops.add_contact("Carol", &[], None);

    assert!(ops.add_phone("Carol", "5555555555").success);
    assert!(ops.add_birthday("Carol", "29.02.2000").success);
    assert!(ops
        .edit_contact(
            "Carol",
            ContactEdit::ChangePhone {
                old: "5555555555".into(),
                new: "6666666666".into(),
            },
        )
        .success);

    let stored = contacts.stored();
    let carol = stored.get("Carol").unwrap();
    assert_eq!(carol.phones[0].as_str(), "6666666666");
    assert_eq!(carol.birthday.unwrap().to_string(), "29.02.2000");

    assert!(ops.delete_contact("Carol").success);
    assert!(contacts.stored().is_empty());
    assert!(!ops.delete_contact("Carol").success);
}

#[test]
fn test_save_failure_reports_error_and_keeps_change() {
    let (mut ops, contacts, _notes) = mock_operations(Config::default());
    contacts.set_fail_saves(true);

    let result = ops.add_contact("Dora", &[], None);
    assert!(!result.success);
    assert!(result.message.contains("read-only"));

    // In memory the contact exists; on "disk" it does not.
    assert!(ops.contact_details("Dora").success);
    assert!(contacts.stored().is_empty());

    contacts.set_fail_saves(false);
    assert!(ops.save_all().success);
    assert!(contacts.stored().contains("Dora"));
}

#[test]
fn test_upcoming_birthdays_leap_day_and_weekend() {
    let (mut ops, _contacts, _notes) = mock_operations(Config::default());
    ops.add_contact("Leap", &[], Some("29.02.2000"));
    ops.add_contact("Weekend", &[], Some("21.02.1995"));

    // 2027 is not a leap year; 28 Feb 2027 is a Sunday, 21 Feb 2027 is a Sunday.
    let today = NaiveDate::from_ymd_opt(2027, 2, 20).unwrap();
    let upcoming = ops.upcoming_birthdays_from(today, Some(10)).data.unwrap();
    let names: Vec<_> = upcoming.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Weekend", "Leap"]);

    assert_eq!(
        upcoming[1].birthday_date,
        NaiveDate::from_ymd_opt(2027, 2, 28).unwrap()
    );
    assert_eq!(
        upcoming[1].congratulation_date,
        NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()
    );
    assert_eq!(
        upcoming[0].congratulation_date,
        NaiveDate::from_ymd_opt(2027, 2, 22).unwrap()
    );
}

#[test]
fn test_statistics_reflect_contacts() {
    let (mut ops, _contacts, _notes) = mock_operations(Config::default());
    ops.add_contact("A", &phones(&["1234567890"]), None);
    ops.add_contact("B", &[], Some("01.01.1990"));

    let stats = ops.statistics().data.unwrap();
    assert_eq!(stats.total_contacts, 2);
    assert_eq!(stats.contacts_with_phones, 1);
    assert_eq!(stats.contacts_with_birthdays, 1);
    assert_eq!(stats.total_notes, 0);
}

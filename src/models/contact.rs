//! Contact model and the address book that holds contacts by name.

use crate::domain::{Birthday, ContactName, PhoneNumber};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A contact in the address book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Unique key within the address book
    pub name: ContactName,

    /// Phone numbers in the order they were added
    #[serde(default)]
    pub phones: Vec<PhoneNumber>,

    /// Optional birthday, stored as `DD.MM.YYYY`
    #[serde(default)]
    pub birthday: Option<Birthday>,
}

impl Contact {
    pub fn new(name: ContactName) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    pub fn has_phone(&self, phone: &PhoneNumber) -> bool {
        self.phones.contains(phone)
    }

    /// Append a phone number. No uniqueness check happens here.
    pub fn add_phone(&mut self, phone: PhoneNumber) {
        self.phones.push(phone);
    }

    /// Remove the first occurrence of `phone`. Returns whether it was present.
    pub fn remove_phone(&mut self, phone: &PhoneNumber) -> bool {
        match self.phones.iter().position(|p| p == phone) {
            Some(index) => {
                self.phones.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the first occurrence of `old` with `new`, keeping its position.
    pub fn replace_phone(&mut self, old: &PhoneNumber, new: PhoneNumber) -> bool {
        match self.phones.iter_mut().find(|p| *p == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    pub fn set_birthday(&mut self, birthday: Option<Birthday>) {
        self.birthday = birthday;
    }

    /// Case-insensitive substring match over the name and every phone.
    ///
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.name.as_str().to_lowercase().contains(query)
            || self.phones.iter().any(|p| p.as_str().contains(query))
    }
}

/// A contact whose birthday falls inside a look-ahead window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BirthdayReminder {
    pub name: String,
    /// The upcoming anniversary itself
    pub birthday_date: NaiveDate,
    /// The anniversary moved off the weekend onto the following Monday
    pub congratulation_date: NaiveDate,
}

/// Contacts keyed by name, iterated in insertion order.
///
/// Persisted as a JSON object `{ name: contact }`; the object order is kept
/// when loading, and every key must equal the contact's own name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.position(name).map(|i| &self.contacts[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Contact> {
        let index = self.position(name)?;
        self.contacts.get_mut(index)
    }

    /// Insert a new contact. Hands the contact back if its name is taken.
    pub fn insert(&mut self, contact: Contact) -> Result<(), Contact> {
        if self.contains(contact.name.as_str()) {
            return Err(contact);
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Contact> {
        self.position(name).map(|i| self.contacts.remove(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Contacts whose name or phones contain `query` (already lowercase).
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.matches(query)).collect()
    }

    /// Birthdays occurring within `days` days of `today` (inclusive).
    ///
    /// Ordered by upcoming date, then by name.
    pub fn upcoming_birthdays(&self, today: NaiveDate, days: u32) -> Vec<BirthdayReminder> {
        let mut upcoming: Vec<BirthdayReminder> = self
            .contacts
            .iter()
            .filter_map(|contact| {
                let birthday = contact.birthday?;
                let mut next = birthday.anniversary_in(today.year());
                if next < today {
                    next = birthday.anniversary_in(today.year() + 1);
                }
                let days_until = (next - today).num_days();
                if days_until > i64::from(days) {
                    return None;
                }
                Some(BirthdayReminder {
                    name: contact.name.to_string(),
                    birthday_date: next,
                    congratulation_date: next_weekday(next),
                })
            })
            .collect();

        upcoming.sort_by(|a, b| {
            a.birthday_date
                .cmp(&b.birthday_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        upcoming
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.contacts.iter().position(|c| c.name.as_str() == name)
    }
}

/// Move Saturday and Sunday forward to Monday.
fn next_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

impl Serialize for AddressBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.contacts.iter().map(|c| (c.name.as_str(), c)))
    }
}

struct AddressBookVisitor;

impl<'de> Visitor<'de> for AddressBookVisitor {
    type Value = AddressBook;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object mapping contact names to contacts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut book = AddressBook::new();
        while let Some((key, contact)) = access.next_entry::<String, Contact>()? {
            if key != contact.name.as_str() {
                return Err(serde::de::Error::custom(format!(
                    "key '{}' does not match contact name '{}'",
                    key, contact.name
                )));
            }
            if let Err(duplicate) = book.insert(contact) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate contact '{}'",
                    duplicate.name
                )));
            }
        }
        Ok(book)
    }
}

impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AddressBookVisitor)
    }
}

//! Contact operations on the façade.

use super::operations::{Collection, Operations};
use super::result::OperationResult;
use crate::config::Config;
use crate::domain::{
    validate_birthday, validate_name, validate_phone, validate_query, Birthday, PhoneNumber,
    ValidationError,
};
use crate::error::{OperationError, OperationOutcome};
use crate::models::{BirthdayReminder, Contact};
use chrono::NaiveDate;
use tracing::debug;

/// A single change applied to an existing contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEdit {
    AddPhone(String),
    RemovePhone(String),
    ChangePhone { old: String, new: String },
    SetBirthday(String),
    RemoveBirthday,
}

fn not_found(name: &str) -> OperationError {
    OperationError::NotFound(format!("Contact '{}'", name.trim()))
}

/// Enforce the duplicate-phone policy against the phones a contact already has.
fn check_new_phone(
    config: &Config,
    existing: &[PhoneNumber],
    phone: &PhoneNumber,
) -> Result<(), ValidationError> {
    if !config.allow_duplicate_phones && existing.contains(phone) {
        return Err(ValidationError::DuplicatePhone(phone.to_string()));
    }
    Ok(())
}

/// Parse a birthday and enforce the future-date policy.
fn parse_birthday(
    config: &Config,
    value: &str,
    today: NaiveDate,
) -> Result<Birthday, ValidationError> {
    let birthday = validate_birthday(value)?;
    if !config.allow_future_birthdays && birthday.is_after(today) {
        return Err(ValidationError::FutureBirthday(value.trim().to_string()));
    }
    Ok(birthday)
}

/// Validate `edit` against `contact` and apply it. Nothing changes on error.
fn apply_edit(
    config: &Config,
    contact: &mut Contact,
    edit: ContactEdit,
    today: NaiveDate,
) -> OperationOutcome<String> {
    let name = contact.name.to_string();
    match edit {
        ContactEdit::AddPhone(phone) => {
            let phone = validate_phone(&phone)?;
            check_new_phone(config, &contact.phones, &phone)?;
            let message = format!("Phone {} added to {}", phone, name);
            contact.add_phone(phone);
            Ok(message)
        }
        ContactEdit::RemovePhone(phone) => {
            let phone = validate_phone(&phone)?;
            if !contact.remove_phone(&phone) {
                return Err(OperationError::NotFound(format!(
                    "Phone {} for {}",
                    phone, name
                )));
            }
            Ok(format!("Phone {} removed from {}", phone, name))
        }
        ContactEdit::ChangePhone { old, new } => {
            let old = validate_phone(&old)?;
            let new = validate_phone(&new)?;
            if !contact.has_phone(&old) {
                return Err(OperationError::NotFound(format!("Phone {} for {}", old, name)));
            }
            if old != new {
                check_new_phone(config, &contact.phones, &new)?;
            }
            let message = format!("Phone {} changed to {} for {}", old, new, name);
            contact.replace_phone(&old, new);
            Ok(message)
        }
        ContactEdit::SetBirthday(value) => {
            let birthday = parse_birthday(config, &value, today)?;
            let message = format!("Birthday {} set for {}", birthday, name);
            contact.set_birthday(Some(birthday));
            Ok(message)
        }
        ContactEdit::RemoveBirthday => {
            if contact.birthday.is_none() {
                return Err(OperationError::NotFound(format!("Birthday for {}", name)));
            }
            contact.set_birthday(None);
            Ok(format!("Birthday removed for {}", name))
        }
    }
}

impl Operations {
    /// Create a contact. Every field is validated before anything is stored.
    pub fn add_contact(
        &mut self,
        name: &str,
        phones: &[String],
        birthday: Option<&str>,
    ) -> OperationResult<Contact> {
        let outcome = self.build_contact(name, phones, birthday).and_then(|contact| {
            let message = format!("Contact {} added", contact.name);
            self.contacts
                .insert(contact.clone())
                .map_err(|dup| OperationError::Duplicate(format!("Contact '{}'", dup.name)))?;
            Ok((message, contact))
        });
        self.commit(Collection::Contacts, outcome)
    }

    fn build_contact(
        &self,
        name: &str,
        phones: &[String],
        birthday: Option<&str>,
    ) -> OperationOutcome<Contact> {
        let name = validate_name(name)?;
        if self.contacts.contains(name.as_str()) {
            return Err(OperationError::Duplicate(format!("Contact '{}'", name)));
        }

        let mut contact = Contact::new(name);
        for phone in phones {
            let phone = validate_phone(phone)?;
            check_new_phone(&self.config, &contact.phones, &phone)?;
            contact.add_phone(phone);
        }
        if let Some(value) = birthday.filter(|b| !b.trim().is_empty()) {
            contact.set_birthday(Some(parse_birthday(&self.config, value, Self::today())?));
        }
        Ok(contact)
    }

    /// Apply one edit to an existing contact.
    pub fn edit_contact(&mut self, name: &str, edit: ContactEdit) -> OperationResult<Contact> {
        debug!("Editing contact {}: {:?}", name, edit);
        let today = Self::today();
        let outcome = match self.contacts.get_mut(name) {
            Some(contact) => apply_edit(&self.config, contact, edit, today)
                .map(|message| (message, contact.clone())),
            None => Err(not_found(name)),
        };
        self.commit(Collection::Contacts, outcome)
    }

    pub fn delete_contact(&mut self, name: &str) -> OperationResult<Contact> {
        let outcome = self
            .contacts
            .remove(name)
            .map(|contact| (format!("Contact {} deleted", contact.name), contact))
            .ok_or_else(|| not_found(name));
        self.commit(Collection::Contacts, outcome)
    }

    /// Append a phone to an existing contact.
    pub fn add_phone(&mut self, name: &str, phone: &str) -> OperationResult<Contact> {
        self.edit_contact(name, ContactEdit::AddPhone(phone.to_string()))
    }

    /// Set or replace the birthday of an existing contact.
    pub fn add_birthday(&mut self, name: &str, birthday: &str) -> OperationResult<Contact> {
        self.edit_contact(name, ContactEdit::SetBirthday(birthday.to_string()))
    }

    /// Contacts whose name or any phone contains `query`, case-insensitively.
    pub fn search_contacts(&self, query: &str) -> OperationResult<Vec<Contact>> {
        Self::reply(self.find_contacts(query).map(|found| {
            (
                format!("Found {} contact(s) matching '{}'", found.len(), query.trim()),
                found,
            )
        }))
    }

    pub(super) fn find_contacts(&self, query: &str) -> OperationOutcome<Vec<Contact>> {
        let query = validate_query(query)?;
        Ok(self.contacts.search(&query).into_iter().cloned().collect())
    }

    pub fn all_contacts(&self) -> OperationResult<Vec<Contact>> {
        let contacts: Vec<Contact> = self.contacts.iter().cloned().collect();
        OperationResult::ok(format!("{} contact(s)", contacts.len()), contacts)
    }

    pub fn contact_details(&self, name: &str) -> OperationResult<Contact> {
        Self::reply(
            self.contacts
                .get(name)
                .map(|contact| (format!("Contact {}", contact.name), contact.clone()))
                .ok_or_else(|| not_found(name)),
        )
    }

    /// Birthdays in the next `days` days, or the configured window when `None`.
    pub fn upcoming_birthdays(&self, days: Option<i64>) -> OperationResult<Vec<BirthdayReminder>> {
        self.upcoming_birthdays_from(Self::today(), days)
    }

    /// Same as [`Operations::upcoming_birthdays`] with an explicit "today".
    pub fn upcoming_birthdays_from(
        &self,
        today: NaiveDate,
        days: Option<i64>,
    ) -> OperationResult<Vec<BirthdayReminder>> {
        let days = days.unwrap_or_else(|| i64::from(self.config.birthday_window_days));
        if days < 0 {
            return Self::reply(Err(ValidationError::NegativeDays(days).into()));
        }
        let window = u32::try_from(days).unwrap_or(u32::MAX);
        let upcoming = self.contacts.upcoming_birthdays(today, window);
        OperationResult::ok(
            format!("{} birthday(s) in the next {} day(s)", upcoming.len(), days),
            upcoming,
        )
    }
}

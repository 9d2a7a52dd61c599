//! The operations façade.
//!
//! `Operations` owns the address book, the note store and their repositories.
//! Every public method returns an [`OperationResult`]; errors never escape as
//! `Err`. Mutations are written through to the repository before returning.
//! If that write fails the in-memory change is kept and the caller gets
//! `success: false` with the storage error in the message.

use super::result::OperationResult;
use crate::config::Config;
use crate::error::{OperationError, OperationOutcome, StorageResult};
use crate::models::{AddressBook, NoteStore};
use crate::repositories::{
    ContactRepository, JsonContactRepository, JsonNoteRepository, NoteRepository,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

/// Which collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Collection {
    Contacts,
    Notes,
}

/// Counts across both collections.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Statistics {
    pub total_contacts: usize,
    pub total_notes: usize,
    pub contacts_with_birthdays: usize,
    pub contacts_with_phones: usize,
    pub notes_with_tags: usize,
}

/// Single entry point for every contact and note operation.
pub struct Operations {
    pub(super) config: Config,
    pub(super) contacts: AddressBook,
    pub(super) notes: NoteStore,
    contact_repo: Box<dyn ContactRepository>,
    note_repo: Box<dyn NoteRepository>,
}

impl Operations {
    /// Open the JSON files named by `config` and load both collections.
    ///
    /// # Errors
    ///
    /// Fails when a file exists but cannot be read or parsed. Missing files
    /// start empty.
    pub fn open(config: Config) -> StorageResult<Self> {
        let contact_repo = Box::new(JsonContactRepository::new(config.contacts_path()));
        let note_repo = Box::new(JsonNoteRepository::new(config.notes_path()));
        Self::with_repositories(config, contact_repo, note_repo)
    }

    /// Build the façade over arbitrary repositories and load both collections.
    pub fn with_repositories(
        config: Config,
        contact_repo: Box<dyn ContactRepository>,
        note_repo: Box<dyn NoteRepository>,
    ) -> StorageResult<Self> {
        let contacts = contact_repo.load()?;
        let notes = note_repo.load()?;
        info!(
            "Loaded {} contacts and {} notes",
            contacts.len(),
            notes.len()
        );

        Ok(Self {
            config,
            contacts,
            notes,
            contact_repo,
            note_repo,
        })
    }

    /// Counts of contacts, notes and how many carry optional data.
    pub fn statistics(&self) -> OperationResult<Statistics> {
        let stats = Statistics {
            total_contacts: self.contacts.len(),
            total_notes: self.notes.len(),
            contacts_with_birthdays: self.contacts.iter().filter(|c| c.birthday.is_some()).count(),
            contacts_with_phones: self.contacts.iter().filter(|c| !c.phones.is_empty()).count(),
            notes_with_tags: self.notes.iter().filter(|n| !n.tags.is_empty()).count(),
        };
        OperationResult::ok(
            format!(
                "{} contact(s), {} note(s)",
                stats.total_contacts, stats.total_notes
            ),
            stats,
        )
    }

    /// Write all data to disk regardless of pending changes.
    pub fn save_all(&self) -> OperationResult<()> {
        let saved = self
            .save(Collection::Contacts)
            .and_then(|_| self.save(Collection::Notes));
        match saved {
            Ok(()) => OperationResult::ok("All data saved", ()),
            Err(e) => {
                error!("Failed to save data: {}", e);
                OperationResult::failure(e.to_string())
            }
        }
    }

    pub(super) fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub(super) fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn save(&self, target: Collection) -> StorageResult<()> {
        match target {
            Collection::Contacts => self.contact_repo.save(&self.contacts),
            Collection::Notes => self.note_repo.save(&self.notes),
        }
    }

    /// Persist a successful mutation and fold the outcome into a result record.
    pub(super) fn commit<T>(
        &self,
        target: Collection,
        outcome: OperationOutcome<(String, T)>,
    ) -> OperationResult<T> {
        let (message, data) = match outcome {
            Ok(done) => done,
            Err(e) => return Self::reject(e),
        };

        match self.save(target) {
            Ok(()) => {
                info!("{}", message);
                OperationResult::ok(message, data)
            }
            Err(e) => {
                let e = OperationError::Persistence(e);
                error!("{}, but saving failed: {}", message, e);
                OperationResult::failure(format!("{}, but saving failed: {}", message, e))
            }
        }
    }

    /// Fold a read-only outcome into a result record.
    pub(super) fn reply<T>(outcome: OperationOutcome<(String, T)>) -> OperationResult<T> {
        match outcome {
            Ok((message, data)) => OperationResult::ok(message, data),
            Err(e) => Self::reject(e),
        }
    }

    fn reject<T>(e: OperationError) -> OperationResult<T> {
        warn!("Operation rejected: {}", e);
        OperationResult::from_error(&e)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;

    #[test]
    fn test_statistics_counts() {
        let (mut ops, _repo) = operations();
        ops.add_contact("Alice", &["1234567890".to_string()], Some("01.01.1990"));
        ops.add_contact("Bob", &[], None);
        ops.add_note("Idea", "Build an app", &["coding".to_string()]);
        ops.add_note("Plain", "", &[]);

        let stats = ops.statistics().data.unwrap();
        assert_eq!(stats.total_contacts, 2);
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.contacts_with_birthdays, 1);
        assert_eq!(stats.contacts_with_phones, 1);
        assert_eq!(stats.notes_with_tags, 1);
    }

    #[test]
    fn test_save_all_reports_failure() {
        let (ops, repo) = operations();
        *repo.fail_saves.lock().unwrap() = true;
        let result = ops.save_all();
        assert!(!result.success);
        assert!(result.message.contains("disk full"));
    }
}

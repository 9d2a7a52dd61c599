//! In-memory repositories shared by the integration tests.

mod mock_contact_repository;
mod mock_note_repository;

pub use mock_contact_repository::MockContactRepository;
pub use mock_note_repository::MockNoteRepository;

use personal_assistant::{Config, Operations};

/// Façade over fresh mocks, plus handles to inspect what was saved.
#[allow(dead_code)]
pub fn mock_operations(config: Config) -> (Operations, MockContactRepository, MockNoteRepository) {
    let contacts = MockContactRepository::new();
    let notes = MockNoteRepository::new();
    let ops = Operations::with_repositories(
        config,
        Box::new(contacts.clone()),
        Box::new(notes.clone()),
    )
    .expect("mock repositories always load");
    (ops, contacts, notes)
}

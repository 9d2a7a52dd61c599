use personal_assistant::error::{StorageError, StorageResult};
use personal_assistant::models::AddressBook;
use personal_assistant::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Holds the last saved address book in memory. Saves can be made to fail
/// to exercise the persistence error path.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    book: Arc<Mutex<AddressBook>>,
    fail_saves: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    pub fn new() -> Self {
        Self {
            book: Arc::new(Mutex::new(AddressBook::new())),
            fail_saves: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start with `book` already "on disk".
    pub fn with_book(book: AddressBook) -> Self {
        let repo = Self::new();
        *repo.book.lock().unwrap() = book;
        repo
    }

    /// The most recently saved address book.
    pub fn stored(&self) -> AddressBook {
        self.book.lock().unwrap().clone()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRepository for MockContactRepository {
    fn load(&self) -> StorageResult<AddressBook> {
        self.track_call("load");
        Ok(self.book.lock().unwrap().clone())
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        self.track_call("save");

        if *self.fail_saves.lock().unwrap() {
            return Err(StorageError::Io {
                path: "mock/addressbook.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }

        *self.book.lock().unwrap() = book.clone();
        Ok(())
    }
}

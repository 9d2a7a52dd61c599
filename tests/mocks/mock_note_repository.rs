use personal_assistant::error::{StorageError, StorageResult};
use personal_assistant::models::NoteStore;
use personal_assistant::repositories::NoteRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock note repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockNoteRepository {
    store: Arc<Mutex<NoteStore>>,
    fail_saves: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockNoteRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(NoteStore::new())),
            fail_saves: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The most recently saved note store.
    pub fn stored(&self) -> NoteStore {
        self.store.lock().unwrap().clone()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepository for MockNoteRepository {
    fn load(&self) -> StorageResult<NoteStore> {
        self.track_call("load");
        Ok(self.store.lock().unwrap().clone())
    }

    fn save(&self, store: &NoteStore) -> StorageResult<()> {
        self.track_call("save");

        if *self.fail_saves.lock().unwrap() {
            return Err(StorageError::Io {
                path: "mock/addressbook_notes.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }

        *self.store.lock().unwrap() = store.clone();
        Ok(())
    }
}

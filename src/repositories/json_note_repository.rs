use crate::error::StorageResult;
use crate::models::NoteStore;
use crate::repositories::json_file;
use crate::repositories::traits::NoteRepository;
use std::path::PathBuf;
use tracing::debug;

/// Note repository backed by a single JSON file.
///
/// The file holds `{"next_id": N, "notes": {id: note}}`.
pub struct JsonNoteRepository {
    path: PathBuf,
}

impl JsonNoteRepository {
    /// Create a repository reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NoteRepository for JsonNoteRepository {
    fn load(&self) -> StorageResult<NoteStore> {
        let store = json_file::read::<NoteStore>(&self.path)?.unwrap_or_default();
        debug!("Loaded {} notes from {}", store.len(), self.path.display());
        Ok(store)
    }

    fn save(&self, store: &NoteStore) -> StorageResult<()> {
        json_file::write(&self.path, store)?;
        debug!("Saved {} notes to {}", store.len(), self.path.display());
        Ok(())
    }
}

use crate::error::StorageResult;
use crate::models::AddressBook;
use crate::repositories::json_file;
use crate::repositories::traits::ContactRepository;
use std::path::PathBuf;
use tracing::debug;

/// Contact repository backed by a single JSON file.
///
/// The file holds one object keyed by contact name.
pub struct JsonContactRepository {
    path: PathBuf,
}

impl JsonContactRepository {
    /// Create a repository reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactRepository for JsonContactRepository {
    fn load(&self) -> StorageResult<AddressBook> {
        let book = json_file::read::<AddressBook>(&self.path)?.unwrap_or_default();
        debug!("Loaded {} contacts from {}", book.len(), self.path.display());
        Ok(book)
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        json_file::write(&self.path, book)?;
        debug!("Saved {} contacts to {}", book.len(), self.path.display());
        Ok(())
    }
}

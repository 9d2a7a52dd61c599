use crate::error::StorageResult;
use crate::models::{AddressBook, NoteStore};

/// Repository for persisting the address book.
///
/// Implementations load and save the whole collection at once. The façade is
/// the only caller.
pub trait ContactRepository: Send + Sync {
    /// Load every contact. A missing backing store yields an empty book.
    fn load(&self) -> StorageResult<AddressBook>;

    /// Replace the stored contacts with `book`.
    fn save(&self, book: &AddressBook) -> StorageResult<()>;
}

/// Repository for persisting notes together with the id counter.
pub trait NoteRepository: Send + Sync {
    /// Load every note. A missing backing store yields an empty store.
    fn load(&self) -> StorageResult<NoteStore>;

    /// Replace the stored notes with `store`.
    fn save(&self, store: &NoteStore) -> StorageResult<()>;
}

mod json_contact_repository;
mod json_file;
mod json_note_repository;
mod traits;

pub use json_contact_repository::JsonContactRepository;
pub use json_note_repository::JsonNoteRepository;
pub use traits::{ContactRepository, NoteRepository};

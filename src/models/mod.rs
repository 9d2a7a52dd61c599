//! Data models for contacts and notes.
//!
//! The containers (`AddressBook`, `NoteStore`) own their records and enforce
//! key invariants; the operations façade owns the containers.

pub mod contact;
pub mod note;

pub use contact::{AddressBook, BirthdayReminder, Contact};
pub use note::{Note, NoteStore};

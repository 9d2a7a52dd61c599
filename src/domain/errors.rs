//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contact name is empty or whitespace only.
    EmptyName,

    /// The phone number is not exactly 10 digits.
    InvalidPhone(String),

    /// The birthday is not a real `DD.MM.YYYY` date.
    InvalidBirthday(String),

    /// The birthday lies in the future and the policy rejects that.
    FutureBirthday(String),

    /// The phone number is already present on the contact.
    DuplicatePhone(String),

    /// The note title is empty or whitespace only.
    EmptyTitle,

    /// The tag is empty or whitespace only.
    EmptyTag,

    /// The note id does not follow the `note_XXXX` pattern.
    InvalidNoteId(String),

    /// A search query is empty or whitespace only.
    EmptyQuery,

    /// A look-ahead window is negative.
    NegativeDays(i64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::InvalidPhone(phone) => {
                write!(f, "Invalid phone number '{}': must be exactly 10 digits", phone)
            }
            Self::InvalidBirthday(value) => {
                write!(f, "Invalid birthday '{}': use DD.MM.YYYY", value)
            }
            Self::FutureBirthday(value) => write!(f, "Birthday '{}' is in the future", value),
            Self::DuplicatePhone(phone) => write!(f, "Phone {} already exists", phone),
            Self::EmptyTitle => write!(f, "Note title cannot be empty"),
            Self::EmptyTag => write!(f, "Tag cannot be empty"),
            Self::InvalidNoteId(id) => write!(f, "Invalid note id: {}", id),
            Self::EmptyQuery => write!(f, "Search query cannot be empty"),
            Self::NegativeDays(days) => write!(f, "Days must not be negative, got {}", days),
        }
    }
}

impl std::error::Error for ValidationError {}

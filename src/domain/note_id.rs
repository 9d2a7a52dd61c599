//! NoteId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "note_";

/// Identifier of a note: `note_` followed by a zero-padded sequence number.
///
/// Ids order by their sequence number, so `note_0009 < note_0010 < note_10000`.
///
/// # Example
///
/// ```
/// use personal_assistant::domain::NoteId;
///
/// let id = NoteId::from_sequence(7);
/// assert_eq!(id.to_string(), "note_0007");
/// assert_eq!("note_0007".parse::<NoteId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(u32);

impl NoteId {
    pub fn from_sequence(sequence: u32) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }

    /// Parse an id in its textual `note_XXXX` form.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidNoteId` when the prefix is missing,
    /// fewer than four digits follow it, or the number is zero.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidNoteId(value.to_string());
        let digits = value.trim().strip_prefix(PREFIX).ok_or_else(invalid)?;
        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(sequence) => Ok(Self(sequence)),
        }
    }
}

impl FromStr for NoteId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NoteId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", PREFIX, self.0)
    }
}

//! Domain value objects and field validators.
//!
//! Each value object validates at construction time, so a `Contact` or `Note`
//! built from them can never hold a malformed name, phone, birthday, tag or id.
//! The `validate_*` functions are thin entry points for callers that only hold
//! raw strings.

pub mod birthday;
pub mod errors;
pub mod name;
pub mod note_id;
pub mod phone;
pub mod tag;

pub use birthday::Birthday;
pub use errors::ValidationError;
pub use name::ContactName;
pub use note_id::NoteId;
pub use phone::PhoneNumber;
pub use tag::Tag;

/// Validate a contact name (non-empty after trimming).
pub fn validate_name(name: &str) -> Result<ContactName, ValidationError> {
    ContactName::new(name)
}

/// Validate a phone number (exactly 10 digits, no formatting).
pub fn validate_phone(phone: &str) -> Result<PhoneNumber, ValidationError> {
    PhoneNumber::new(phone)
}

/// Validate a birthday (`DD.MM.YYYY`, real calendar date).
pub fn validate_birthday(birthday: &str) -> Result<Birthday, ValidationError> {
    Birthday::parse(birthday)
}

/// Validate a note title (non-empty after trimming), returning it trimmed.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Validate a tag (non-empty after trimming), returning it lowercased.
pub fn validate_tag(tag: &str) -> Result<Tag, ValidationError> {
    Tag::new(tag)
}

/// Validate a free-text search query, returning it lowercased.
///
/// Surrounding whitespace is kept, so `" s"` only matches an `s` that follows a space.
pub fn validate_query(query: &str) -> Result<String, ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(query.to_lowercase())
}

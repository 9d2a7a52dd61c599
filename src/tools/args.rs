//! Typed argument structs for each callable function.
//!
//! These are what the dispatcher deserializes validated arguments into, and
//! what the MCP server advertises as tool input schemas. Optional fields are
//! skipped when serializing so a round trip through JSON keeps "absent"
//! distinct from "empty".

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddContactArgs {
    /// The name of the contact
    pub name: String,
    /// Phone numbers, 10 digits each
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    /// Birthday in DD.MM.YYYY format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QueryArgs {
    /// Case-insensitive search text
    pub query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NameArgs {
    /// The name of the contact
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContactAction {
    AddPhone,
    RemovePhone,
    ChangePhone,
    AddBirthday,
    RemoveBirthday,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditContactArgs {
    /// The name of the contact to edit
    pub name: String,
    /// The action to perform
    pub action: ContactAction,
    /// Phone for add/remove, or the old phone for change_phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Replacement phone for change_phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_phone: Option<String>,
    /// Birthday in DD.MM.YYYY format for add_birthday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpcomingBirthdaysArgs {
    /// Days ahead to look (default from configuration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddPhoneArgs {
    pub name: String,
    /// Phone number, 10 digits
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddBirthdayArgs {
    pub name: String,
    /// Birthday in DD.MM.YYYY format
    pub birthday: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddNoteArgs {
    /// The title of the note
    pub title: String,
    /// The note text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tags, stored lowercase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    EditTitle,
    EditContent,
    AddTag,
    RemoveTag,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditNoteArgs {
    /// Note id such as note_0001
    pub note_id: String,
    /// The action to perform
    pub action: NoteAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoteIdArgs {
    /// Note id such as note_0001
    pub note_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TagArgs {
    /// Tag to match exactly, case-insensitively
    pub tag: String,
}

/// Arguments for functions that take none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoArgs {}

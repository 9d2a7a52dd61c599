//! The function table offered to AI callers.
//!
//! Each entry names a function, describes it, and declares its parameters.
//! The dispatcher checks incoming arguments against this table before any
//! façade method runs, and `pa functions` prints it as OpenAI-style
//! function-calling schemas.

use crate::error::{DispatchError, DispatchResult};
use serde_json::{json, Map, Value};

/// Shape of a single parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    StringArray,
    Integer,
}

/// Declaration of one function parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
    /// Allowed values for string parameters; empty means any string
    pub allowed: &'static [&'static str],
}

/// Declaration of one callable function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        required: true,
        description,
        allowed: &[],
    }
}

const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        required: false,
        description,
        allowed: &[],
    }
}

pub const CONTACT_ACTIONS: &[&str] = &[
    "add_phone",
    "remove_phone",
    "change_phone",
    "add_birthday",
    "remove_birthday",
];

pub const NOTE_ACTIONS: &[&str] = &["edit_title", "edit_content", "add_tag", "remove_tag"];

/// Every function the dispatcher accepts.
pub static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec {
        name: "add_contact",
        description: "Add a new contact. Name is required, phones can be multiple",
        params: &[
            required("name", ParamKind::String, "The name of the contact"),
            optional(
                "phones",
                ParamKind::StringArray,
                "Array of phone numbers (10 digits each)",
            ),
            optional("birthday", ParamKind::String, "The birthday in DD.MM.YYYY format"),
        ],
    },
    FunctionSpec {
        name: "search_contacts",
        description: "Search for contacts by name or phone number",
        params: &[required(
            "query",
            ParamKind::String,
            "The search query (name or phone)",
        )],
    },
    FunctionSpec {
        name: "show_contacts",
        description: "List all contacts",
        params: &[],
    },
    FunctionSpec {
        name: "edit_contact",
        description: "Edit an existing contact (add/remove/change phone, set/remove birthday)",
        params: &[
            required("name", ParamKind::String, "The name of the contact to edit"),
            ParamSpec {
                name: "action",
                kind: ParamKind::String,
                required: true,
                description: "The action to perform",
                allowed: CONTACT_ACTIONS,
            },
            optional(
                "phone",
                ParamKind::String,
                "Phone number for phone operations (10 digits)",
            ),
            optional(
                "new_phone",
                ParamKind::String,
                "New phone number for change_phone (10 digits)",
            ),
            optional("birthday", ParamKind::String, "Birthday in DD.MM.YYYY format"),
        ],
    },
    FunctionSpec {
        name: "delete_contact",
        description: "Delete a contact",
        params: &[required(
            "name",
            ParamKind::String,
            "The name of the contact to delete",
        )],
    },
    FunctionSpec {
        name: "view_contact_details",
        description: "View detailed information about a specific contact",
        params: &[required(
            "name",
            ParamKind::String,
            "The name of the contact to view",
        )],
    },
    FunctionSpec {
        name: "get_upcoming_birthdays",
        description: "Get contacts with upcoming birthdays",
        params: &[optional(
            "days",
            ParamKind::Integer,
            "Number of days ahead to check (default: 7)",
        )],
    },
    FunctionSpec {
        name: "get_statistics",
        description: "Get statistics about contacts and notes",
        params: &[],
    },
    FunctionSpec {
        name: "add_phone",
        description: "Add a phone number to an existing contact",
        params: &[
            required("name", ParamKind::String, "The name of the contact"),
            required("phone", ParamKind::String, "Phone number (10 digits)"),
        ],
    },
    FunctionSpec {
        name: "add_birthday",
        description: "Set or replace the birthday of an existing contact",
        params: &[
            required("name", ParamKind::String, "The name of the contact"),
            required("birthday", ParamKind::String, "Birthday in DD.MM.YYYY format"),
        ],
    },
    FunctionSpec {
        name: "add_note",
        description: "Add a new note with optional tags",
        params: &[
            required("title", ParamKind::String, "The title of the note"),
            optional("content", ParamKind::String, "The content of the note"),
            optional("tags", ParamKind::StringArray, "List of tags for the note"),
        ],
    },
    FunctionSpec {
        name: "search_notes",
        description: "Search for notes by title, content, or tags",
        params: &[required("query", ParamKind::String, "The search query")],
    },
    FunctionSpec {
        name: "show_notes",
        description: "List all notes",
        params: &[],
    },
    FunctionSpec {
        name: "edit_note",
        description: "Edit an existing note (title, content, tags)",
        params: &[
            required("note_id", ParamKind::String, "The ID of the note to edit"),
            ParamSpec {
                name: "action",
                kind: ParamKind::String,
                required: true,
                description: "The action to perform",
                allowed: NOTE_ACTIONS,
            },
            optional("title", ParamKind::String, "New title for the note"),
            optional("content", ParamKind::String, "New content for the note"),
            optional("tag", ParamKind::String, "Tag to add or remove"),
        ],
    },
    FunctionSpec {
        name: "delete_note",
        description: "Delete a note",
        params: &[required(
            "note_id",
            ParamKind::String,
            "The ID of the note to delete",
        )],
    },
    FunctionSpec {
        name: "view_note_details",
        description: "View detailed information about a specific note",
        params: &[required(
            "note_id",
            ParamKind::String,
            "The ID of the note to view",
        )],
    },
    FunctionSpec {
        name: "search_notes_by_tag",
        description: "Search for notes by specific tag",
        params: &[required("tag", ParamKind::String, "The tag to search for")],
    },
    FunctionSpec {
        name: "global_search",
        description: "Search across both contacts and notes simultaneously",
        params: &[required(
            "query",
            ParamKind::String,
            "The search query to apply to both contacts and notes",
        )],
    },
];

/// Look up a function by name.
pub fn find(name: &str) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// All function schemas as a JSON array.
pub fn function_schemas() -> Value {
    Value::Array(FUNCTIONS.iter().map(FunctionSpec::schema).collect())
}

impl ParamKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ParamKind::String => "a string",
            ParamKind::StringArray => "an array of strings",
            ParamKind::Integer => "an integer",
        }
    }

    fn schema(self) -> Value {
        match self {
            ParamKind::String => json!({"type": "string"}),
            ParamKind::StringArray => json!({"type": "array", "items": {"type": "string"}}),
            ParamKind::Integer => json!({"type": "integer"}),
        }
    }
}

impl FunctionSpec {
    /// OpenAI-style function schema.
    pub fn schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut schema = param.kind.schema();
            if let Value::Object(fields) = &mut schema {
                fields.insert("description".into(), param.description.into());
                if !param.allowed.is_empty() {
                    fields.insert("enum".into(), json!(param.allowed));
                }
            }
            properties.insert(param.name.to_string(), schema);
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    /// Check required presence, value shapes and allowed values.
    ///
    /// A `null` value counts as absent. Undeclared keys are ignored.
    pub fn validate(&self, arguments: &Map<String, Value>) -> DispatchResult<()> {
        for param in self.params {
            let value = match arguments.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(DispatchError::MissingParameter {
                        function: self.name.to_string(),
                        parameter: param.name.to_string(),
                    });
                }
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };

            if !param.kind.matches(value) {
                return Err(self.invalid(param, format!("expected {}", param.kind.describe())));
            }

            if !param.allowed.is_empty() {
                let text = value.as_str().unwrap_or_default();
                if !param.allowed.contains(&text) {
                    return Err(self.invalid(
                        param,
                        format!("'{}' is not one of {}", text, param.allowed.join(", ")),
                    ));
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, param: &ParamSpec, reason: String) -> DispatchError {
        DispatchError::InvalidParameter {
            function: self.name.to_string(),
            parameter: param.name.to_string(),
            reason,
        }
    }
}

//! Function dispatch: named calls with JSON arguments to façade methods.

use super::args::*;
use super::definitions;
use crate::error::{DispatchError, DispatchResult};
use crate::services::{ContactEdit, NoteEdit, OperationResult, Operations};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A validated call to one façade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCall {
    AddContact {
        name: String,
        phones: Vec<String>,
        birthday: Option<String>,
    },
    SearchContacts {
        query: String,
    },
    ShowContacts,
    EditContact {
        name: String,
        edit: ContactEdit,
    },
    DeleteContact {
        name: String,
    },
    ViewContactDetails {
        name: String,
    },
    GetUpcomingBirthdays {
        days: Option<i64>,
    },
    GetStatistics,
    AddPhone {
        name: String,
        phone: String,
    },
    AddBirthday {
        name: String,
        birthday: String,
    },
    AddNote {
        title: String,
        content: String,
        tags: Vec<String>,
    },
    SearchNotes {
        query: String,
    },
    ShowNotes,
    EditNote {
        note_id: String,
        edit: NoteEdit,
    },
    DeleteNote {
        note_id: String,
    },
    ViewNoteDetails {
        note_id: String,
    },
    SearchNotesByTag {
        tag: String,
    },
    GlobalSearch {
        query: String,
    },
}

fn decode<T: DeserializeOwned>(function: &str, arguments: Map<String, Value>) -> DispatchResult<T> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| DispatchError::InvalidParameter {
        function: function.to_string(),
        parameter: "arguments".to_string(),
        reason: e.to_string(),
    })
}

fn require(function: &str, parameter: &str, value: Option<String>) -> DispatchResult<String> {
    value.ok_or_else(|| DispatchError::MissingParameter {
        function: function.to_string(),
        parameter: parameter.to_string(),
    })
}

impl FunctionCall {
    /// Validate `arguments` against the function table and build the call.
    ///
    /// `null` arguments are treated as an empty object.
    pub fn parse(function: &str, arguments: Value) -> DispatchResult<Self> {
        let spec = definitions::find(function)
            .ok_or_else(|| DispatchError::UnknownFunction(function.to_string()))?;

        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(DispatchError::ArgumentsNotObject {
                    function: function.to_string(),
                })
            }
        };
        spec.validate(&arguments)?;

        let call = match spec.name {
            "add_contact" => {
                let args: AddContactArgs = decode(function, arguments)?;
                FunctionCall::AddContact {
                    name: args.name,
                    phones: args.phones.unwrap_or_default(),
                    birthday: args.birthday,
                }
            }
            "search_contacts" => FunctionCall::SearchContacts {
                query: decode::<QueryArgs>(function, arguments)?.query,
            },
            "show_contacts" => FunctionCall::ShowContacts,
            "edit_contact" => {
                let args: EditContactArgs = decode(function, arguments)?;
                Self::contact_edit(function, args)?
            }
            "delete_contact" => FunctionCall::DeleteContact {
                name: decode::<NameArgs>(function, arguments)?.name,
            },
            "view_contact_details" => FunctionCall::ViewContactDetails {
                name: decode::<NameArgs>(function, arguments)?.name,
            },
            "get_upcoming_birthdays" => FunctionCall::GetUpcomingBirthdays {
                days: decode::<UpcomingBirthdaysArgs>(function, arguments)?.days,
            },
            "get_statistics" => FunctionCall::GetStatistics,
            "add_phone" => {
                let args: AddPhoneArgs = decode(function, arguments)?;
                FunctionCall::AddPhone {
                    name: args.name,
                    phone: args.phone,
                }
            }
            "add_birthday" => {
                let args: AddBirthdayArgs = decode(function, arguments)?;
                FunctionCall::AddBirthday {
                    name: args.name,
                    birthday: args.birthday,
                }
            }
            "add_note" => {
                let args: AddNoteArgs = decode(function, arguments)?;
                FunctionCall::AddNote {
                    title: args.title,
                    content: args.content.unwrap_or_default(),
                    tags: args.tags.unwrap_or_default(),
                }
            }
            "search_notes" => FunctionCall::SearchNotes {
                query: decode::<QueryArgs>(function, arguments)?.query,
            },
            "show_notes" => FunctionCall::ShowNotes,
            "edit_note" => {
                let args: EditNoteArgs = decode(function, arguments)?;
                Self::note_edit(function, args)?
            }
            "delete_note" => FunctionCall::DeleteNote {
                note_id: decode::<NoteIdArgs>(function, arguments)?.note_id,
            },
            "view_note_details" => FunctionCall::ViewNoteDetails {
                note_id: decode::<NoteIdArgs>(function, arguments)?.note_id,
            },
            "search_notes_by_tag" => FunctionCall::SearchNotesByTag {
                tag: decode::<TagArgs>(function, arguments)?.tag,
            },
            "global_search" => FunctionCall::GlobalSearch {
                query: decode::<QueryArgs>(function, arguments)?.query,
            },
            other => return Err(DispatchError::UnknownFunction(other.to_string())),
        };
        Ok(call)
    }

    fn contact_edit(function: &str, args: EditContactArgs) -> DispatchResult<Self> {
        let edit = match args.action {
            ContactAction::AddPhone => ContactEdit::AddPhone(require(function, "phone", args.phone)?),
            ContactAction::RemovePhone => {
                ContactEdit::RemovePhone(require(function, "phone", args.phone)?)
            }
            ContactAction::ChangePhone => ContactEdit::ChangePhone {
                old: require(function, "phone", args.phone)?,
                new: require(function, "new_phone", args.new_phone)?,
            },
            ContactAction::AddBirthday => {
                ContactEdit::SetBirthday(require(function, "birthday", args.birthday)?)
            }
            ContactAction::RemoveBirthday => ContactEdit::RemoveBirthday,
        };
        Ok(FunctionCall::EditContact {
            name: args.name,
            edit,
        })
    }

    fn note_edit(function: &str, args: EditNoteArgs) -> DispatchResult<Self> {
        let edit = match args.action {
            NoteAction::EditTitle => NoteEdit::SetTitle(require(function, "title", args.title)?),
            NoteAction::EditContent => {
                NoteEdit::SetBody(require(function, "content", args.content)?)
            }
            NoteAction::AddTag => NoteEdit::AddTag(require(function, "tag", args.tag)?),
            NoteAction::RemoveTag => NoteEdit::RemoveTag(require(function, "tag", args.tag)?),
        };
        Ok(FunctionCall::EditNote {
            note_id: args.note_id,
            edit,
        })
    }

    /// The external function name this call answers to.
    pub fn name(&self) -> &'static str {
        match self {
            FunctionCall::AddContact { .. } => "add_contact",
            FunctionCall::SearchContacts { .. } => "search_contacts",
            FunctionCall::ShowContacts => "show_contacts",
            FunctionCall::EditContact { .. } => "edit_contact",
            FunctionCall::DeleteContact { .. } => "delete_contact",
            FunctionCall::ViewContactDetails { .. } => "view_contact_details",
            FunctionCall::GetUpcomingBirthdays { .. } => "get_upcoming_birthdays",
            FunctionCall::GetStatistics => "get_statistics",
            FunctionCall::AddPhone { .. } => "add_phone",
            FunctionCall::AddBirthday { .. } => "add_birthday",
            FunctionCall::AddNote { .. } => "add_note",
            FunctionCall::SearchNotes { .. } => "search_notes",
            FunctionCall::ShowNotes => "show_notes",
            FunctionCall::EditNote { .. } => "edit_note",
            FunctionCall::DeleteNote { .. } => "delete_note",
            FunctionCall::ViewNoteDetails { .. } => "view_note_details",
            FunctionCall::SearchNotesByTag { .. } => "search_notes_by_tag",
            FunctionCall::GlobalSearch { .. } => "global_search",
        }
    }
}

/// Payloads leave the dispatcher as plain JSON.
fn into_json<T: Serialize>(result: OperationResult<T>) -> OperationResult<Value> {
    let OperationResult {
        success,
        message,
        data,
    } = result;
    match data.map(serde_json::to_value).transpose() {
        Ok(data) => OperationResult {
            success,
            message,
            data,
        },
        Err(e) => OperationResult::failure(format!("{} (result could not be encoded: {})", message, e)),
    }
}

/// Routes function calls to the façade it owns.
pub struct Dispatcher {
    operations: Operations,
}

impl Dispatcher {
    pub fn new(operations: Operations) -> Self {
        Self { operations }
    }

    /// Parse and execute one named call. Never fails: errors come back as
    /// `success: false` records.
    pub fn dispatch(&mut self, function: &str, arguments: Value) -> OperationResult<Value> {
        debug!("Dispatching {} with {}", function, arguments);
        match FunctionCall::parse(function, arguments) {
            Ok(call) => self.execute(call),
            Err(e) => {
                warn!("Rejected call to {}: {}", function, e);
                OperationResult::failure(e.to_string())
            }
        }
    }

    /// Execute an already validated call.
    pub fn execute(&mut self, call: FunctionCall) -> OperationResult<Value> {
        let ops = &mut self.operations;
        match call {
            FunctionCall::AddContact {
                name,
                phones,
                birthday,
            } => into_json(ops.add_contact(&name, &phones, birthday.as_deref())),
            FunctionCall::SearchContacts { query } => into_json(ops.search_contacts(&query)),
            FunctionCall::ShowContacts => into_json(ops.all_contacts()),
            FunctionCall::EditContact { name, edit } => into_json(ops.edit_contact(&name, edit)),
            FunctionCall::DeleteContact { name } => into_json(ops.delete_contact(&name)),
            FunctionCall::ViewContactDetails { name } => into_json(ops.contact_details(&name)),
            FunctionCall::GetUpcomingBirthdays { days } => into_json(ops.upcoming_birthdays(days)),
            FunctionCall::GetStatistics => into_json(ops.statistics()),
            FunctionCall::AddPhone { name, phone } => into_json(ops.add_phone(&name, &phone)),
            FunctionCall::AddBirthday { name, birthday } => {
                into_json(ops.add_birthday(&name, &birthday))
            }
            FunctionCall::AddNote {
                title,
                content,
                tags,
            } => into_json(ops.add_note(&title, &content, &tags)),
            FunctionCall::SearchNotes { query } => into_json(ops.search_notes(&query)),
            FunctionCall::ShowNotes => into_json(ops.all_notes()),
            FunctionCall::EditNote { note_id, edit } => into_json(ops.edit_note(&note_id, edit)),
            FunctionCall::DeleteNote { note_id } => into_json(ops.delete_note(&note_id)),
            FunctionCall::ViewNoteDetails { note_id } => into_json(ops.note_details(&note_id)),
            FunctionCall::SearchNotesByTag { tag } => into_json(ops.notes_by_tag(&tag)),
            FunctionCall::GlobalSearch { query } => into_json(ops.global_search(&query)),
        }
    }
}

//! Note operations and cross-collection search on the façade.

use super::operations::{Collection, Operations};
use super::result::OperationResult;
use crate::domain::{validate_query, validate_tag, validate_title, NoteId, Tag, ValidationError};
use crate::error::{OperationError, OperationOutcome};
use crate::models::{Contact, Note};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A single change applied to an existing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEdit {
    SetTitle(String),
    SetBody(String),
    AddTag(String),
    RemoveTag(String),
}

/// Combined result of searching contacts and notes with the same query.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GlobalSearch {
    pub contacts: Vec<Contact>,
    pub notes: BTreeMap<NoteId, Note>,
}

fn not_found(id: &NoteId) -> OperationError {
    OperationError::NotFound(format!("Note '{}'", id))
}

fn parse_tags(tags: &[String]) -> Result<BTreeSet<Tag>, ValidationError> {
    tags.iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| validate_tag(t))
        .collect()
}

impl Operations {
    /// Create a note under the next id. Blank tags are dropped, the rest lowercased.
    pub fn add_note(&mut self, title: &str, body: &str, tags: &[String]) -> OperationResult<Note> {
        let now = Self::now();
        let outcome = validate_title(title)
            .and_then(|title| Ok((title, parse_tags(tags)?)))
            .map_err(OperationError::from)
            .and_then(|(title, tags)| {
                let id = self
                    .notes
                    .create(title, body.to_string(), tags, now)
                    .ok_or_else(|| OperationError::Exhausted("note ids".to_string()))?;
                let note = self.notes.get(&id).cloned().ok_or_else(|| not_found(&id))?;
                Ok((format!("Note {} added", id), note))
            });
        self.commit(Collection::Notes, outcome)
    }

    /// Apply one edit to an existing note, stamping `updated_at` when it changes.
    pub fn edit_note(&mut self, id: &str, edit: NoteEdit) -> OperationResult<Note> {
        let now = Self::now();
        let outcome = NoteId::parse(id)
            .map_err(OperationError::from)
            .and_then(|id| {
                let note = self.notes.get_mut(&id).ok_or_else(|| not_found(&id))?;
                let message = match edit {
                    NoteEdit::SetTitle(title) => {
                        note.set_title(validate_title(&title)?, now);
                        format!("Title of {} updated", id)
                    }
                    NoteEdit::SetBody(body) => {
                        note.set_body(body, now);
                        format!("Content of {} updated", id)
                    }
                    NoteEdit::AddTag(tag) => {
                        let tag = validate_tag(&tag)?;
                        if !note.add_tag(tag.clone(), now) {
                            return Err(OperationError::Duplicate(format!(
                                "Tag '{}' on {}",
                                tag, id
                            )));
                        }
                        format!("Tag '{}' added to {}", tag, id)
                    }
                    NoteEdit::RemoveTag(tag) => {
                        let tag = validate_tag(&tag)?;
                        if !note.remove_tag(&tag, now) {
                            return Err(OperationError::NotFound(format!(
                                "Tag '{}' on {}",
                                tag, id
                            )));
                        }
                        format!("Tag '{}' removed from {}", tag, id)
                    }
                };
                Ok((message, note.clone()))
            });
        self.commit(Collection::Notes, outcome)
    }

    pub fn delete_note(&mut self, id: &str) -> OperationResult<Note> {
        let outcome = NoteId::parse(id)
            .map_err(OperationError::from)
            .and_then(|id| {
                self.notes
                    .remove(&id)
                    .map(|note| (format!("Note {} deleted", id), note))
                    .ok_or_else(|| not_found(&id))
            });
        self.commit(Collection::Notes, outcome)
    }

    /// Notes whose title, body or any tag contains `query`, keyed by id.
    pub fn search_notes(&self, query: &str) -> OperationResult<BTreeMap<NoteId, Note>> {
        Self::reply(self.find_notes(query).map(|found| {
            (
                format!("Found {} note(s) matching '{}'", found.len(), query.trim()),
                found,
            )
        }))
    }

    fn find_notes(&self, query: &str) -> OperationOutcome<BTreeMap<NoteId, Note>> {
        let query = validate_query(query)?;
        Ok(self
            .notes
            .search(&query)
            .into_iter()
            .map(|note| (note.id, note.clone()))
            .collect())
    }

    /// Notes carrying exactly `tag`, compared case-insensitively.
    pub fn notes_by_tag(&self, tag: &str) -> OperationResult<Vec<Note>> {
        let outcome = validate_query(tag)
            .and_then(|query| validate_tag(&query))
            .map_err(OperationError::from)
            .map(|tag| {
                let found: Vec<Note> = self.notes.with_tag(&tag).into_iter().cloned().collect();
                (format!("Found {} note(s) tagged '{}'", found.len(), tag), found)
            });
        Self::reply(outcome)
    }

    pub fn all_notes(&self) -> OperationResult<Vec<Note>> {
        let notes: Vec<Note> = self.notes.iter().cloned().collect();
        OperationResult::ok(format!("{} note(s)", notes.len()), notes)
    }

    pub fn note_details(&self, id: &str) -> OperationResult<Note> {
        let outcome = NoteId::parse(id)
            .map_err(OperationError::from)
            .and_then(|id| {
                self.notes
                    .get(&id)
                    .map(|note| (format!("Note {}", id), note.clone()))
                    .ok_or_else(|| not_found(&id))
            });
        Self::reply(outcome)
    }

    /// Search contacts and notes independently with the same query.
    pub fn global_search(&self, query: &str) -> OperationResult<GlobalSearch> {
        let outcome = self.find_contacts(query).and_then(|contacts| {
            let notes = self.find_notes(query)?;
            let message = format!(
                "Found {} contact(s) and {} note(s) matching '{}'",
                contacts.len(),
                notes.len(),
                query.trim()
            );
            Ok((message, GlobalSearch { contacts, notes }))
        });
        Self::reply(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::operations::test_support::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_add_note_assigns_sequential_ids() {
        let (mut ops, repo) = operations();
        let first = ops.add_note("Idea", "Build an app", &tags(&["coding"]));
        assert!(first.success, "{}", first.message);
        let first = first.data.unwrap();
        assert_eq!(first.id.to_string(), "note_0001");
        assert_eq!(repo.notes.lock().unwrap().len(), 1);

        ops.delete_note("note_0001");
        let second = ops.add_note("Other", "", &[]).data.unwrap();
        assert_eq!(second.id.to_string(), "note_0002");
    }

    #[test]
    fn test_add_note_fails_cleanly_when_ids_run_out() {
        let repo = MemoryRepo::default();
        *repo.notes.lock().unwrap() =
            serde_json::from_str(r#"{"next_id": 4294967296, "notes": {}}"#).unwrap();
        let mut ops = Operations::with_repositories(
            crate::Config::default(),
            Box::new(repo.clone()),
            Box::new(repo.clone()),
        )
        .unwrap();

        let result = ops.add_note("Late", "", &[]);
        assert!(!result.success);
        assert_eq!(result.message, "No note ids left to assign");
        assert!(ops.all_notes().data.unwrap().is_empty());
    }

    #[test]
    fn test_add_note_lowercases_tags_and_requires_title() {
        let (mut ops, _repo) = operations();
        let note = ops
            .add_note("Plan", "", &tags(&["Work", "URGENT", " "]))
            .data
            .unwrap();
        let names: Vec<_> = note.tags.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["urgent", "work"]);

        let result = ops.add_note("  ", "body", &[]);
        assert!(!result.success);
        assert_eq!(result.message, "Note title cannot be empty");
        assert_eq!(ops.all_notes().data.unwrap().len(), 1);
    }

    #[test]
    fn test_search_notes_matches_tag_only() {
        let (mut ops, _repo) = operations();
        ops.add_note("Idea", "Build an app", &tags(&["coding"]));
        ops.add_note("Shopping", "Milk", &tags(&["home"]));

        let found = ops.search_notes("coding").data.unwrap();
        assert_eq!(found.len(), 1);
        let note = found.values().next().unwrap();
        assert_eq!(note.title, "Idea");
        assert!(!note.title.to_lowercase().contains("coding"));
        assert!(!note.body.to_lowercase().contains("coding"));
    }

    #[test]
    fn test_edit_note_updates_timestamp() {
        let (mut ops, _repo) = operations();
        let created = ops.add_note("Draft", "", &[]).data.unwrap();

        let edited = ops
            .edit_note("note_0001", NoteEdit::SetBody("final text".into()))
            .data
            .unwrap();
        assert_eq!(edited.body, "final text");
        assert_eq!(edited.created_at, created.created_at);
        assert!(edited.updated_at >= created.updated_at);

        let retitled = ops.edit_note("note_0001", NoteEdit::SetTitle(" Final ".into()));
        assert_eq!(retitled.data.unwrap().title, "Final");
        assert!(!ops.edit_note("note_0001", NoteEdit::SetTitle("".into())).success);
    }

    #[test]
    fn test_edit_note_tags() {
        let (mut ops, _repo) = operations();
        ops.add_note("Tagged", "", &tags(&["a"]));

        assert!(ops.edit_note("note_0001", NoteEdit::AddTag("B".into())).success);
        assert!(!ops.edit_note("note_0001", NoteEdit::AddTag("b".into())).success);
        assert!(ops.edit_note("note_0001", NoteEdit::RemoveTag("A".into())).success);
        let result = ops.edit_note("note_0001", NoteEdit::RemoveTag("a".into()));
        assert!(!result.success);
        assert!(result.message.contains("not found"));
    }

    #[test]
    fn test_bad_or_missing_note_id() {
        let (mut ops, _repo) = operations();
        let result = ops.note_details("abc");
        assert!(!result.success);
        assert!(result.message.contains("Invalid note id"));

        let result = ops.delete_note("note_0042");
        assert!(!result.success);
        assert_eq!(result.message, "Note 'note_0042' not found");
    }

    #[test]
    fn test_notes_by_tag_is_exact() {
        let (mut ops, _repo) = operations();
        ops.add_note("One", "", &tags(&["work"]));
        ops.add_note("Two", "", &tags(&["workshop"]));
        let found = ops.notes_by_tag("WORK").data.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "One");
        assert!(!ops.notes_by_tag(" ").success);
    }

    #[test]
    fn test_global_search_combines_both() {
        let (mut ops, _repo) = operations();
        ops.add_contact("Alice", &[], None);
        ops.add_note("Call Alice", "", &[]);
        ops.add_note("Unrelated", "", &[]);

        let combined = ops.global_search("alice").data.unwrap();
        assert_eq!(combined.contacts, ops.search_contacts("alice").data.unwrap());
        assert_eq!(combined.notes, ops.search_notes("alice").data.unwrap());
        assert_eq!(combined.notes.len(), 1);
    }
}

//! Note model and the store that assigns note ids.

use crate::domain::{NoteId, Tag};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Timestamps in older notes files: naive, microsecond precision, read as UTC.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One past the largest sequence a `NoteId` can carry.
const COUNTER_LIMIT: u64 = u32::MAX as u64 + 1;

/// A free-form note with a title, body and tags.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Note {
    /// Identifier assigned by the store
    pub id: NoteId,

    /// Non-empty, trimmed title
    pub title: String,

    /// Note text
    pub body: String,

    /// Lowercase tags
    pub tags: BTreeSet<Tag>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a note. `title` must already be validated.
    pub fn new(
        id: NoteId,
        title: String,
        body: String,
        tags: BTreeSet<Tag>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_title(&mut self, title: String, now: DateTime<Utc>) {
        self.title = title;
        self.updated_at = now;
    }

    pub fn set_body(&mut self, body: String, now: DateTime<Utc>) {
        self.body = body;
        self.updated_at = now;
    }

    /// Add a tag. Returns false (and leaves the note untouched) if it was present.
    pub fn add_tag(&mut self, tag: Tag, now: DateTime<Utc>) -> bool {
        let added = self.tags.insert(tag);
        if added {
            self.updated_at = now;
        }
        added
    }

    /// Remove a tag. Returns false (and leaves the note untouched) if it was absent.
    pub fn remove_tag(&mut self, tag: &Tag, now: DateTime<Utc>) -> bool {
        let removed = self.tags.remove(tag);
        if removed {
            self.updated_at = now;
        }
        removed
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Case-insensitive substring match over title, body and every tag.
    ///
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.body.to_lowercase().contains(query)
            || self.tags.iter().any(|t| t.as_str().contains(query))
    }
}

/// Accepts RFC 3339 as well as the naive `2024-01-01 10:00:00.123456` form.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| format!("invalid timestamp '{}'", value))
}

struct StoredTimestamp(DateTime<Utc>);

impl<'de> Deserialize<'de> for StoredTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text)
            .map(StoredTimestamp)
            .map_err(de::Error::custom)
    }
}

/// A note as read from disk. The id may be absent (it is then the map key)
/// and `updated_at` may be null for notes that were never edited.
#[derive(Deserialize)]
struct NoteRecord {
    #[serde(default)]
    id: Option<NoteId>,
    title: String,
    #[serde(default, alias = "content")]
    body: String,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    created_at: StoredTimestamp,
    #[serde(default)]
    updated_at: Option<StoredTimestamp>,
}

impl NoteRecord {
    fn into_note(self, key: NoteId) -> Result<Note, String> {
        if let Some(id) = self.id {
            if id != key {
                return Err(format!("key '{}' does not match note id '{}'", key, id));
            }
        }
        let created_at = self.created_at.0;
        Ok(Note {
            id: key,
            title: self.title,
            body: self.body,
            tags: self.tags,
            created_at,
            updated_at: self.updated_at.map_or(created_at, |t| t.0),
        })
    }
}

/// Notes keyed by id, iterated in ascending id order.
///
/// The id counter only moves forward: deleting the newest note does not make
/// its id available again, and the counter is persisted alongside the notes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NoteStore {
    next_id: u64,
    notes: BTreeMap<NoteId, Note>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            notes: BTreeMap::new(),
        }
    }
}

/// Reads `{"next_id": N, "notes": {...}}` and the older bare `{id: note}` map.
struct NoteStoreVisitor;

impl<'de> Visitor<'de> for NoteStoreVisitor {
    type Value = NoteStore;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a notes document or a map of note id to note")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut next_id: Option<u64> = None;
        let mut nested: Option<BTreeMap<NoteId, NoteRecord>> = None;
        let mut bare = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "next_id" => next_id = Some(map.next_value()?),
                "notes" => nested = Some(map.next_value()?),
                other => {
                    let id = NoteId::parse(other).map_err(de::Error::custom)?;
                    bare.insert(id, map.next_value::<NoteRecord>()?);
                }
            }
        }

        let records = match nested {
            Some(_) if !bare.is_empty() => {
                return Err(de::Error::custom(
                    "notes document mixes a 'notes' map with top-level notes",
                ))
            }
            Some(records) => records,
            None => bare,
        };
        NoteStore::from_records(next_id, records).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for NoteStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NoteStoreVisitor)
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_records(
        next_id: Option<u64>,
        records: BTreeMap<NoteId, NoteRecord>,
    ) -> Result<Self, String> {
        let notes = records
            .into_iter()
            .map(|(key, record)| Ok((key, record.into_note(key)?)))
            .collect::<Result<BTreeMap<_, _>, String>>()?;

        let after_last = notes
            .keys()
            .next_back()
            .map_or(1, |id| u64::from(id.sequence()) + 1);
        let next_id = next_id.unwrap_or(1).max(after_last);
        if next_id > COUNTER_LIMIT {
            return Err(format!("next_id {} is out of range", next_id));
        }

        Ok(Self { next_id, notes })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The id the next created note will receive, or `None` once ids are used up.
    pub fn peek_next_id(&self) -> Option<NoteId> {
        u32::try_from(self.next_id).ok().map(NoteId::from_sequence)
    }

    /// Create a note under a freshly assigned id and return that id.
    ///
    /// Returns `None`, leaving the store untouched, when every id has been handed out.
    pub fn create(
        &mut self,
        title: String,
        body: String,
        tags: BTreeSet<Tag>,
        now: DateTime<Utc>,
    ) -> Option<NoteId> {
        let id = self.peek_next_id()?;
        self.next_id += 1;
        self.notes.insert(id, Note::new(id, title, body, tags, now));
        Some(id)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        self.notes.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Notes whose title, body or tags contain `query` (already lowercase).
    pub fn search(&self, query: &str) -> Vec<&Note> {
        self.notes.values().filter(|n| n.matches(query)).collect()
    }

    /// Notes carrying exactly `tag`.
    pub fn with_tag(&self, tag: &Tag) -> Vec<&Note> {
        self.notes.values().filter(|n| n.has_tag(tag)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> BTreeSet<Tag> {
        values.iter().map(|t| Tag::new(t).unwrap()).collect()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, micro: u32) -> DateTime<Utc> {
        let naive = chrono::NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_micro_opt(h, min, s, micro)
            .unwrap();
        Utc.from_utc_datetime(&naive)
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut store = NoteStore::new();
        let now = Utc::now();
        let first = store.create("One".into(), String::new(), tags(&[]), now).unwrap();
        let second = store.create("Two".into(), String::new(), tags(&[]), now).unwrap();
        assert_eq!(first.to_string(), "note_0001");
        assert_eq!(second.to_string(), "note_0002");

        store.remove(&second);
        let third = store.create("Three".into(), String::new(), tags(&[]), now).unwrap();
        assert_eq!(third.to_string(), "note_0003");
    }

    #[test]
    fn test_matches_title_body_and_tags() {
        let mut store = NoteStore::new();
        let now = Utc::now();
        store.create("Idea".into(), "Build an app".into(), tags(&["coding"]), now);
        store.create("Groceries".into(), "Milk".into(), tags(&["home"]), now);

        assert_eq!(store.search("idea").len(), 1);
        assert_eq!(store.search("app").len(), 1);
        assert_eq!(store.search("cod").len(), 1);
        assert_eq!(store.search("zzz").len(), 0);
    }

    #[test]
    fn test_tag_edits_touch_updated_at_only_on_change() {
        let created = Utc::now();
        let later = created + chrono::Duration::seconds(5);
        let mut note = Note::new(
            NoteId::from_sequence(1),
            "Title".into(),
            String::new(),
            tags(&["a"]),
            created,
        );

        assert!(!note.add_tag(Tag::new("A").unwrap(), later));
        assert_eq!(note.updated_at, created);

        assert!(note.add_tag(Tag::new("b").unwrap(), later));
        assert_eq!(note.updated_at, later);
        assert_eq!(note.created_at, created);
    }

    #[test]
    fn test_round_trip_keeps_counter() {
        let mut store = NoteStore::new();
        let now = Utc::now();
        store.create("One".into(), String::new(), tags(&["x"]), now);
        let second = store.create("Two".into(), String::new(), tags(&[]), now).unwrap();
        store.remove(&second);

        let json = serde_json::to_string(&store).unwrap();
        let mut restored: NoteStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
        let next = restored.create("Three".into(), String::new(), tags(&[]), now).unwrap();
        assert_eq!(next.to_string(), "note_0003");
    }

    #[test]
    fn test_loads_file_written_by_previous_version() {
        let json = r#"{
          "notes": {
            "note_0001": {
              "title": "Shopping",
              "content": "Milk, bread",
              "tags": ["home", "Urgent"],
              "created_at": "2024-01-01 10:00:00.123456",
              "updated_at": null
            },
            "note_0003": {
              "title": "Idea",
              "content": "Build an app",
              "tags": [],
              "created_at": "2024-01-02 08:30:00.000001",
              "updated_at": "2024-01-05 12:00:00.500000"
            }
          },
          "next_id": 4
        }"#;
        let store: NoteStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.peek_next_id().unwrap().to_string(), "note_0004");

        let first = store.get(&NoteId::from_sequence(1)).unwrap();
        assert_eq!(first.id.to_string(), "note_0001");
        assert_eq!(first.body, "Milk, bread");
        assert!(first.has_tag(&Tag::new("urgent").unwrap()));
        assert_eq!(first.created_at, utc(2024, 1, 1, 10, 0, 0, 123_456));
        assert_eq!(first.updated_at, first.created_at);

        let third = store.get(&NoteId::from_sequence(3)).unwrap();
        assert_eq!(third.updated_at, utc(2024, 1, 5, 12, 0, 0, 500_000));
    }

    #[test]
    fn test_bare_map_derives_counter_from_highest_id() {
        let json = r#"{
            "note_0004": {
                "title": "Old",
                "content": "legacy body",
                "tags": ["misc"],
                "created_at": "2023-11-20 18:45:12.004511",
                "updated_at": null
            }
        }"#;
        let store: NoteStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.peek_next_id().unwrap().to_string(), "note_0005");
        let note = store.get(&NoteId::from_sequence(4)).unwrap();
        assert_eq!(note.body, "legacy body");
    }

    #[test]
    fn test_mismatched_key_is_rejected() {
        let json = r#"{"next_id": 3, "notes": {"note_0001": {
            "id": "note_0002", "title": "T", "body": "", "tags": [],
            "created_at": "2024-01-01T10:00:00Z", "updated_at": "2024-01-01T10:00:00Z"
        }}}"#;
        let err = serde_json::from_str::<NoteStore>(json).unwrap_err();
        assert!(err.to_string().contains("does not match"), "{}", err);
    }

    #[test]
    fn test_bad_record_error_names_the_field() {
        let json = r#"{"next_id": 2, "notes": {"note_0001": {
            "content": "no title", "tags": [], "created_at": "2024-01-01 10:00:00.000000"
        }}}"#;
        let err = serde_json::from_str::<NoteStore>(json).unwrap_err();
        assert!(err.to_string().contains("title"), "{}", err);

        let json = r#"{"note_0001": {"title": "T", "created_at": "yesterday"}}"#;
        let err = serde_json::from_str::<NoteStore>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp 'yesterday'"), "{}", err);
    }

    #[test]
    fn test_counter_exhaustion_never_overwrites() {
        let json = r#"{"next_id": 4294967295, "notes": {}}"#;
        let mut store: NoteStore = serde_json::from_str(json).unwrap();
        let now = Utc::now();

        let last = store.create("Last".into(), String::new(), tags(&[]), now);
        assert_eq!(last.unwrap().to_string(), "note_4294967295");
        assert!(store.create("Overflow".into(), String::new(), tags(&[]), now).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.iter().next().unwrap().title, "Last");
    }

    #[test]
    fn test_counter_beyond_id_range_is_rejected() {
        let json = r#"{"next_id": 4294967297, "notes": {}}"#;
        let err = serde_json::from_str::<NoteStore>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
    }
}

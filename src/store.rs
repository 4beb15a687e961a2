//! The persisted root aggregate.
//!
//! The whole application state serializes into one JSON document stored
//! under a single slot. Wire field names keep the original camelCase
//! spelling so existing backups stay importable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bookmark::Bookmark;
use crate::note::Note;
use crate::task::{SortMode, Task};

/// Current format version tag
pub const DATA_VERSION: &str = "3.0";

/// Everything the toolbox persists, written wholesale on every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedStore {
    /// Absent in the slot parses as empty, never as the current tag, so
    /// the load gate can tell an untagged document from a current one
    #[serde(default)]
    pub version: String,
    pub tasks: Vec<Task>,
    pub bookmarks: Vec<Bookmark>,
    pub current_sort: SortMode,
    pub notepad_compare_mode: bool,
    pub notepad_content1: String,
    pub notepad_content2: String,
    pub notes: Vec<Note>,
    /// Monotonic counter for note ids; never decreases, ids are never reused
    pub next_note_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_note_id: Option<u64>,
}

impl Default for PersistedStore {
    fn default() -> Self {
        Self {
            version: DATA_VERSION.to_string(),
            tasks: Vec::new(),
            bookmarks: Vec::new(),
            current_sort: SortMode::default(),
            notepad_compare_mode: false,
            notepad_content1: String::new(),
            notepad_content2: String::new(),
            notes: Vec::new(),
            next_note_id: 1,
            current_note_id: None,
        }
    }
}

impl PersistedStore {
    /// Best-effort parse of a raw slot value. Absent or corrupt input
    /// degrades to the default store with a logged diagnostic; this never
    /// fails.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match serde_json::from_str(raw) {
            Ok(store) => store,
            Err(err) => {
                warn!("stored data is unreadable, starting empty: {err}");
                Self::default()
            }
        }
    }

    pub fn current_note(&self) -> Option<&Note> {
        let id = self.current_note_id?;
        self.notes.iter().find(|note| note.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_is_empty_at_version() {
        let store = PersistedStore::default();
        assert_eq!(store.version, DATA_VERSION);
        assert!(store.tasks.is_empty());
        assert_eq!(store.next_note_id, 1);
        assert_eq!(store.current_note_id, None);
    }

    #[test]
    fn corrupt_slot_degrades_to_default() {
        let store = PersistedStore::parse_lenient(Some("{not json"));
        assert_eq!(store, PersistedStore::default());
    }

    #[test]
    fn absent_slot_degrades_to_default() {
        assert_eq!(PersistedStore::parse_lenient(None), PersistedStore::default());
        assert_eq!(
            PersistedStore::parse_lenient(Some("  ")),
            PersistedStore::default()
        );
    }

    #[test]
    fn absent_version_parses_as_empty_not_current() {
        let store = PersistedStore::parse_lenient(Some(r#"{"tasks":[]}"#));
        assert_eq!(store.version, "");
        assert_ne!(store.version, DATA_VERSION);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let store = PersistedStore::parse_lenient(Some(r#"{"version":"3.0"}"#));
        assert_eq!(store.version, "3.0");
        assert_eq!(store.next_note_id, 1);
        assert!(!store.notepad_compare_mode);
    }

    #[test]
    fn wire_names_round_trip() {
        let store = PersistedStore::default();
        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("currentSort").is_some());
        assert!(json.get("notepadContent1").is_some());
        assert!(json.get("nextNoteId").is_some());
        // absent current note is omitted entirely
        assert!(json.get("currentNoteId").is_none());
    }
}

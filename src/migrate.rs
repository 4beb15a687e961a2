//! Version gate applied when rehydrating from storage.
//!
//! A one-shot, pure migration step: given the raw slot values and the
//! current version tag, produce the store and layout to run with plus any
//! user-facing notices. Core entities (tasks, bookmarks, notes) survive a
//! version mismatch unconditionally; only the derived layout is discarded.

use tracing::warn;

use crate::layout;
use crate::store::PersistedStore;

/// Result of the load-time version gate
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub store: PersistedStore,
    pub layout: Vec<String>,
    /// One-time messages to surface to the user
    pub notices: Vec<String>,
    /// True when the stored layout slot should be cleared
    pub layout_discarded: bool,
}

/// Compare the stored version against `current_version` and rehydrate.
///
/// - Absent or unequal version: keep every entity and scalar field, drop
///   the layout back to the default order and emit a notice.
/// - Equal version: additionally accept the stored layout, but only when
///   it names the complete expected panel set; a partial order is
///   discarded whole.
///
/// Also repairs referential slack: a `currentNoteId` pointing at no note
/// degrades to no selection, and the note id counter is clamped above the
/// highest existing id so ids stay strictly increasing.
pub fn migrate(
    raw_store: Option<&str>,
    raw_layout: Option<&str>,
    current_version: &str,
) -> Migration {
    let mut store = PersistedStore::parse_lenient(raw_store);
    let mut notices = Vec::new();

    let compatible = raw_store.is_some() && store.version == current_version;
    if !compatible && raw_store.is_some() {
        notices.push(format!(
            "Stored data predates format {current_version}; panel layout was reset (tasks, bookmarks and notes are untouched)"
        ));
    }

    let mut layout_discarded = !compatible && raw_layout.is_some();
    let layout = if compatible {
        parse_layout(raw_layout, &mut layout_discarded)
    } else {
        layout::default_order()
    };

    // a fresh save always carries the current tag
    store.version = current_version.to_string();

    if let Some(id) = store.current_note_id {
        if !store.notes.iter().any(|note| note.id == id) {
            warn!("current note {id} no longer exists, clearing selection");
            store.current_note_id = None;
        }
    }

    let min_next = store
        .notes
        .iter()
        .map(|note| note.id + 1)
        .max()
        .unwrap_or(1);
    if store.next_note_id < min_next {
        store.next_note_id = min_next;
    }

    Migration {
        store,
        layout,
        notices,
        layout_discarded,
    }
}

fn parse_layout(raw_layout: Option<&str>, discarded: &mut bool) -> Vec<String> {
    let raw = match raw_layout {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return layout::default_order(),
    };

    let stored: Vec<String> = match serde_json::from_str(raw) {
        Ok(stored) => stored,
        Err(err) => {
            warn!("stored layout is unreadable, using default order: {err}");
            *discarded = true;
            return layout::default_order();
        }
    };

    if stored.is_empty() {
        return layout::default_order();
    }

    if !layout::is_complete(&stored) {
        warn!("stored layout is missing panels, using default order");
        *discarded = true;
        return layout::default_order();
    }

    stored
}

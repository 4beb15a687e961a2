//! Notebook entries: title derivation, search, recency ordering and the
//! markdown export document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes with no usable title or content
pub const UNTITLED: &str = "Untitled note";

/// How many characters of content seed a derived title
const DERIVED_TITLE_LEN: usize = 20;

/// A single notebook entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Strictly increasing, assigned from the store's monotonic counter,
    /// never reused after deletion
    pub id: u64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(id: u64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match across title and content
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.content.to_lowercase().contains(query_lower)
    }
}

/// Derive the effective title: a blank title falls back to the first 20
/// characters of the content (with an ellipsis when truncated), then to
/// the untitled placeholder.
pub fn derive_title(title: &str, content: &str) -> String {
    let title = title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let content = content.trim();
    if content.is_empty() {
        return UNTITLED.to_string();
    }

    let head: String = content.chars().take(DERIVED_TITLE_LEN).collect();
    if content.chars().count() > DERIVED_TITLE_LEN {
        format!("{head}...")
    } else {
        head
    }
}

/// Filter notes by a search query (empty query matches everything)
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = query.trim().to_lowercase();
    notes
        .iter()
        .filter(|note| query.is_empty() || note.matches(&query))
        .collect()
}

/// Order note references most-recently-updated first (stable)
pub fn sort_recent(notes: &mut [&Note]) {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Render all notes into one markdown export document, most recently
/// updated first.
pub fn export_markdown(notes: &[Note], now: DateTime<Utc>) -> String {
    let mut ordered: Vec<&Note> = notes.iter().collect();
    sort_recent(&mut ordered);

    let mut out = String::from("# Notebook export\n\n");
    out.push_str(&format!("Exported: {}\n", now.to_rfc3339()));
    out.push_str(&format!("Notes: {}\n\n---\n\n", notes.len()));

    for (index, note) in ordered.iter().enumerate() {
        let title = if note.title.is_empty() {
            UNTITLED
        } else {
            note.title.as_str()
        };
        out.push_str(&format!("## {}. {}\n\n", index + 1, title));
        out.push_str(&format!("**Created**: {}\n", note.created_at.to_rfc3339()));
        out.push_str(&format!("**Updated**: {}\n", note.updated_at.to_rfc3339()));
        out.push_str(&format!("**Length**: {}\n\n", note.content.chars().count()));

        if note.content.is_empty() {
            out.push_str("**Content**: (blank note)\n\n");
        } else {
            out.push_str("**Content**:\n\n");
            out.push_str(&note.content);
            out.push_str("\n\n");
        }
        out.push_str("---\n\n");
    }

    out
}

//! Data usage report for the settings surface.

use serde::Serialize;

use crate::error::Result;
use crate::storage::Storage;
use crate::store::PersistedStore;

/// Sizes and counts of the persisted data
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub store_bytes: u64,
    pub layout_bytes: u64,
    /// Version tag found in the slot, if any
    pub version: Option<String>,
    pub tasks: usize,
    pub notes: usize,
    pub bookmarks: usize,
}

impl UsageReport {
    pub fn total_bytes(&self) -> u64 {
        self.store_bytes + self.layout_bytes
    }
}

/// Inspect both slots without mutating anything
pub fn report(storage: &Storage) -> Result<UsageReport> {
    let raw = storage.read_raw(&storage.store_file())?;
    let store = PersistedStore::parse_lenient(raw.as_deref());

    let version = raw
        .as_deref()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .and_then(|value| {
            value
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        });

    Ok(UsageReport {
        store_bytes: storage.slot_size(&storage.store_file()),
        layout_bytes: storage.slot_size(&storage.layout_file()),
        version,
        tasks: store.tasks.len(),
        notes: store.notes.len(),
        bookmarks: store.bookmarks.len(),
    })
}

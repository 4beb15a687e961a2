//! Panel layout order.
//!
//! The layout is derived state: it is regenerable to the default order and
//! is discarded whenever it is incomplete or the stored data predates the
//! current format version.

use crate::error::{Error, Result};

/// The complete set of panel identifiers, in default order
pub const PANELS: [&str; 6] = [
    "translator-area",
    "notepad-area",
    "ocr-area",
    "tasks-area",
    "bookmarks-area",
    "notebook-area",
];

/// Default panel order
pub fn default_order() -> Vec<String> {
    PANELS.iter().map(|panel| panel.to_string()).collect()
}

/// A stored order is only usable when it names every expected panel;
/// a partial order is never applied.
pub fn is_complete(order: &[String]) -> bool {
    PANELS
        .iter()
        .all(|panel| order.iter().any(|entry| entry == panel))
}

/// Validate a user-supplied order: every entry must be a known panel,
/// no duplicates, and the set must be complete.
pub fn validate(order: &[String]) -> Result<()> {
    for entry in order {
        if !PANELS.contains(&entry.as_str()) {
            return Err(Error::InvalidArgument(format!("unknown panel: {entry}")));
        }
    }

    for (index, entry) in order.iter().enumerate() {
        if order[..index].contains(entry) {
            return Err(Error::InvalidArgument(format!("duplicate panel: {entry}")));
        }
    }

    if !is_complete(order) {
        let missing: Vec<&str> = PANELS
            .iter()
            .filter(|panel| !order.iter().any(|entry| entry == *panel))
            .copied()
            .collect();
        return Err(Error::InvalidArgument(format!(
            "incomplete layout, missing: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

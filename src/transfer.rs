//! Export/import of the full configuration.
//!
//! The export document wraps both slots, read straight from storage
//! rather than from in-memory state, together with a metadata block. An
//! import is all-or-nothing: the current slot values are backed up in
//! memory before the overwrite, and any write failure restores them
//! before the error propagates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::store::DATA_VERSION;

/// Metadata block written into every export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub client: String,
    pub url: String,
}

/// The portable backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_info: Value,
    pub toolbox_data: Value,
    pub layout_order: Option<Value>,
}

/// Counts and timestamps shown before an import is applied
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub exported_at: String,
    pub version: String,
    pub tasks: usize,
    pub notes: usize,
    pub bookmarks: usize,
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backup file:")?;
        writeln!(f, "  exported: {}", self.exported_at)?;
        writeln!(f, "  version:  {}", self.version)?;
        writeln!(
            f,
            "  tasks: {}, notes: {}, bookmarks: {}",
            self.tasks, self.notes, self.bookmarks
        )?;
        write!(f, "Importing will overwrite all current data.")
    }
}

/// Assemble the export document from the raw slot values
pub fn export_document(storage: &Storage, now: DateTime<Utc>) -> Result<ExportDocument> {
    let toolbox_data = match storage.read_raw(&storage.store_file())? {
        Some(raw) => serde_json::from_str(&raw).unwrap_or(Value::Null),
        None => Value::Null,
    };
    let layout_order = match storage.read_raw(&storage.layout_file())? {
        Some(raw) => Some(serde_json::from_str(&raw).unwrap_or(Value::Null)),
        None => None,
    };

    let info = ExportInfo {
        version: DATA_VERSION.to_string(),
        timestamp: now,
        client: format!("tbx/{}", env!("CARGO_PKG_VERSION")),
        url: storage.store_file().display().to_string(),
    };

    Ok(ExportDocument {
        export_info: serde_json::to_value(&info)?,
        toolbox_data,
        layout_order,
    })
}

/// Date-stamped default name for the backup file
pub fn default_export_filename(now: DateTime<Utc>) -> String {
    format!("toolbox-backup_{}.txt", now.format("%Y-%m-%d"))
}

/// Parse and validate an import document. Anything lacking the metadata
/// block or the store block is rejected before any state changes.
pub fn validate_document(value: Value) -> Result<ExportDocument> {
    if !value.is_object() {
        return Err(Error::ImportMalformed("not a JSON object".to_string()));
    }

    let doc: ExportDocument = serde_json::from_value(value)
        .map_err(|err| Error::ImportMalformed(err.to_string()))?;

    if doc.export_info.is_null() || !doc.export_info.is_object() {
        return Err(Error::ImportMalformed(
            "missing exportInfo block".to_string(),
        ));
    }
    if doc.toolbox_data.is_null() {
        return Err(Error::ImportMalformed(
            "missing toolboxData block".to_string(),
        ));
    }

    Ok(doc)
}

/// Build the human-readable confirmation summary for a validated document
pub fn summarize(doc: &ExportDocument) -> ImportSummary {
    let count = |field: &str| {
        doc.toolbox_data
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    };

    ImportSummary {
        exported_at: doc
            .export_info
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        version: doc
            .export_info
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        tasks: count("tasks"),
        notes: count("notes"),
        bookmarks: count("bookmarks"),
    }
}

/// Overwrite both slots from a validated document, with rollback.
///
/// The current raw slot values are held in memory across the overwrite;
/// if any write fails they are restored before the error propagates, so
/// no partial state persists. A document without a layout block leaves
/// the current layout slot untouched.
pub fn apply_import(storage: &Storage, doc: &ExportDocument) -> Result<()> {
    let store_path = storage.store_file();
    let layout_path = storage.layout_file();

    let store_backup = storage.read_raw(&store_path)?;
    let layout_backup = storage.read_raw(&layout_path)?;

    let outcome = write_imported_slots(storage, doc);
    if let Err(err) = outcome {
        // best effort restore; the original failure is the one reported
        let _ = storage.restore_raw(&store_path, store_backup.as_deref());
        let _ = storage.restore_raw(&layout_path, layout_backup.as_deref());
        return Err(Error::ImportWriteFailed(err.to_string()));
    }

    Ok(())
}

fn write_imported_slots(storage: &Storage, doc: &ExportDocument) -> Result<()> {
    storage.write_json(&storage.store_file(), &doc.toolbox_data)?;

    if let Some(layout) = &doc.layout_order {
        if !layout.is_null() {
            storage.write_json(&storage.layout_file(), layout)?;
        }
    }

    Ok(())
}

/// Full import flow: validate, confirm with a counts-and-timestamps
/// summary, then overwrite with rollback. Returns false when declined.
pub fn import(storage: &Storage, value: Value, confirm: &mut dyn Confirm) -> Result<bool> {
    let doc = validate_document(value)?;
    let summary = summarize(&doc);

    if !confirm.confirm(&format!("{summary}\nContinue?")) {
        return Ok(false);
    }

    apply_import(storage, &doc)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            validate_document(json!([1, 2])),
            Err(Error::ImportMalformed(_))
        ));
    }

    #[test]
    fn rejects_missing_toolbox_data() {
        let doc = json!({ "exportInfo": { "version": "3.0" } });
        assert!(matches!(
            validate_document(doc),
            Err(Error::ImportMalformed(_))
        ));
    }

    #[test]
    fn rejects_missing_export_info() {
        let doc = json!({ "toolboxData": { "version": "3.0" } });
        assert!(matches!(
            validate_document(doc),
            Err(Error::ImportMalformed(_))
        ));
    }

    #[test]
    fn summary_counts_collections() {
        let doc = validate_document(json!({
            "exportInfo": { "version": "3.0", "timestamp": "2026-08-25T00:00:00Z" },
            "toolboxData": {
                "tasks": [1, 2, 3],
                "notes": [1],
                "bookmarks": []
            }
        }))
        .unwrap();

        let summary = summarize(&doc);
        assert_eq!(summary.tasks, 3);
        assert_eq!(summary.notes, 1);
        assert_eq!(summary.bookmarks, 0);
        assert_eq!(summary.version, "3.0");
        assert_eq!(summary.exported_at, "2026-08-25T00:00:00Z");
    }

    #[test]
    fn declined_import_changes_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        storage
            .write_atomic(&storage.store_file(), b"{\"version\":\"3.0\"}")
            .unwrap();
        let before = storage.read_raw(&storage.store_file()).unwrap();

        let doc = json!({
            "exportInfo": { "version": "3.0" },
            "toolboxData": { "version": "3.0", "tasks": [] }
        });

        let mut decline = |_: &str| false;
        let applied = import(&storage, doc, &mut decline).unwrap();
        assert!(!applied);
        assert_eq!(storage.read_raw(&storage.store_file()).unwrap(), before);
    }

    #[test]
    fn export_filename_is_date_stamped() {
        let now = "2026-08-25T10:00:00Z".parse().unwrap();
        assert_eq!(default_export_filename(now), "toolbox-backup_2026-08-25.txt");
    }
}

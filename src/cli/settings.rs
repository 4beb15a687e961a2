//! tbx export/import/reset/usage commands

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::app::App;
use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::transfer;
use crate::usage;

pub fn run_export(
    storage: &Storage,
    output: Option<PathBuf>,
    options: OutputOptions,
) -> Result<()> {
    let now = Utc::now();
    let document = transfer::export_document(storage, now)?;
    let path = output.unwrap_or_else(|| PathBuf::from(transfer::default_export_filename(now)));

    let contents = serde_json::to_string_pretty(&document)?;
    std::fs::write(&path, &contents)?;

    let mut human = HumanOutput::new("tbx export: backup written");
    human.push_summary("path", path.display().to_string());
    human.push_summary("size", format!("{} bytes", contents.len()));
    if document.toolbox_data.is_null() {
        human.push_warning("no stored data yet; the backup is empty".to_string());
    }
    emit_success(
        options,
        "export",
        &serde_json::json!({ "path": path, "bytes": contents.len() }),
        Some(&human),
    )
}

pub fn run_import(
    storage: &Storage,
    file: &Path,
    options: OutputOptions,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|err| Error::ImportMalformed(format!("not valid JSON: {err}")))?;

    let applied = transfer::import(storage, value, confirm)?;
    if !applied {
        let human = HumanOutput::new("tbx import: cancelled");
        return emit_success(
            options,
            "import",
            &serde_json::json!({ "applied": false }),
            Some(&human),
        );
    }

    // rehydrate wholly from the newly written slots, never from the
    // imported document directly
    let mut app = App::load(storage.clone())?;
    let _ = app.take_notices();
    let store = app.store();

    let mut human = HumanOutput::new("tbx import: backup applied");
    human.push_summary("tasks", store.tasks.len().to_string());
    human.push_summary("notes", store.notes.len().to_string());
    human.push_summary("bookmarks", store.bookmarks.len().to_string());
    emit_success(
        options,
        "import",
        &serde_json::json!({
            "applied": true,
            "tasks": store.tasks.len(),
            "notes": store.notes.len(),
            "bookmarks": store.bookmarks.len(),
        }),
        Some(&human),
    )
}

pub fn run_reset(app: &mut App, options: OutputOptions, confirm: &mut dyn Confirm) -> Result<()> {
    let cleared = app.reset_all(confirm)?;
    let header = if cleared {
        "tbx reset: all data cleared"
    } else {
        "tbx reset: cancelled"
    };
    let human = HumanOutput::new(header);
    emit_success(
        options,
        "reset",
        &serde_json::json!({ "cleared": cleared }),
        Some(&human),
    )
}

pub fn run_usage(storage: &Storage, options: OutputOptions) -> Result<()> {
    let report = usage::report(storage)?;

    let mut human = HumanOutput::new("tbx usage");
    human.push_summary(
        "data size",
        format!("{:.2} KB", report.total_bytes() as f64 / 1024.0),
    );
    human.push_summary(
        "version",
        report.version.clone().unwrap_or_else(|| "none".to_string()),
    );
    human.push_summary("tasks", report.tasks.to_string());
    human.push_summary("notes", report.notes.to_string());
    human.push_summary("bookmarks", report.bookmarks.to_string());
    emit_success(options, "usage", &report, Some(&human))
}

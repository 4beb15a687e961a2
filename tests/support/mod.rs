//! Shared helpers for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use tbx::app::App;
use tbx::storage::Storage;

pub fn storage() -> (TempDir, Storage) {
    let temp = TempDir::new().unwrap();
    let storage = Storage::new(temp.path().to_path_buf());
    (temp, storage)
}

pub fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

/// An app with one task, one bookmark and two notes
pub fn populated_app(storage: Storage) -> App {
    let mut app = App::load(storage).unwrap();
    let now = stamp();

    app.add_task("ship the release", 3, now + chrono::Duration::days(2), 2, now)
        .unwrap();
    app.add_bookmark("docs", "docs.example.com", Some("#112233"), now)
        .unwrap();

    let first = app.create_note(now).unwrap().id;
    app.save_note(first, "Meeting notes", "discuss roadmap", now)
        .unwrap();
    let second = app.create_note(now).unwrap().id;
    app.save_note(second, "", "groceries: milk", now).unwrap();

    app
}

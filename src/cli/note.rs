//! tbx note commands
//!
//! `note edit` without flags runs an append session on stdin: each line
//! re-arms the debounced autosave, and the pending save is flushed
//! synchronously at end of input so nothing is written twice.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::app::App;
use crate::autosave::{Debouncer, PeriodicTimer};
use crate::config::Config;
use crate::confirm::Confirm;
use crate::error::Result;
use crate::note::{self, Note};
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::NoteCommands;

#[derive(serde::Serialize)]
struct NoteListReport {
    total: usize,
    matched: usize,
    current: Option<u64>,
    notes: Vec<Note>,
}

pub fn run(
    app: &mut App,
    command: NoteCommands,
    options: OutputOptions,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    match command {
        NoteCommands::New => {
            let note = app.create_note(Utc::now())?.clone();
            let mut human = HumanOutput::new("tbx note new: note created");
            human.push_summary("id", note.id.to_string());
            emit_success(options, "note new", &note, Some(&human))
        }

        NoteCommands::List { search } => {
            let total = app.store().notes.len();
            let query = search.unwrap_or_default();
            let hits: Vec<Note> = app
                .search_notes(&query)
                .into_iter()
                .cloned()
                .collect();

            let header = if total == 0 {
                "tbx note list: notebook is empty".to_string()
            } else if hits.is_empty() {
                format!("tbx note list: no notes match \"{}\"", query.trim())
            } else {
                format!("tbx note list: {} of {} note(s)", hits.len(), total)
            };

            let report = NoteListReport {
                total,
                matched: hits.len(),
                current: app.store().current_note_id,
                notes: hits,
            };

            let mut human = HumanOutput::new(header);
            for note in &report.notes {
                let marker = if report.current == Some(note.id) {
                    "*"
                } else {
                    " "
                };
                let title = if note.title.is_empty() {
                    note::UNTITLED
                } else {
                    &note.title
                };
                human.push_detail(format!(
                    "{marker} {} {} (updated {})",
                    note.id,
                    title,
                    note.updated_at.format("%Y-%m-%d %H:%M")
                ));
            }
            emit_success(options, "note list", &report, Some(&human))
        }

        NoteCommands::Show { id } => {
            let note = app.note(id)?.clone();
            let mut human = HumanOutput::new(format!("tbx note show: {}", note.title));
            human.push_summary("created", note.created_at.to_rfc3339());
            human.push_summary("updated", note.updated_at.to_rfc3339());
            human.push_summary("length", note.content.chars().count().to_string());
            if !note.content.is_empty() {
                human.push_detail(note.content.clone());
            }
            emit_success(options, "note show", &note, Some(&human))
        }

        NoteCommands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                return run_append_session(app, id, options);
            }

            let existing = app.note(id)?;
            let new_title = title.unwrap_or_else(|| existing.title.clone());
            let new_content = content.unwrap_or_else(|| existing.content.clone());
            app.save_note(id, &new_title, &new_content, Utc::now())?;

            let note = app.note(id)?.clone();
            let mut human = HumanOutput::new("tbx note edit: note saved");
            human.push_summary("id", note.id.to_string());
            human.push_summary("title", note.title.clone());
            emit_success(options, "note edit", &note, Some(&human))
        }

        NoteCommands::Select { id } => {
            app.select_note(id)?;
            let mut human = HumanOutput::new("tbx note select: note is now current");
            human.push_summary("id", id.to_string());
            emit_success(
                options,
                "note select",
                &serde_json::json!({ "id": id }),
                Some(&human),
            )
        }

        NoteCommands::Rm { id } => {
            let removed = app.remove_note(id, confirm)?;
            let header = if removed {
                "tbx note rm: note deleted"
            } else {
                "tbx note rm: cancelled"
            };
            let mut human = HumanOutput::new(header);
            human.push_summary("id", id.to_string());
            if let Some(current) = app.store().current_note_id {
                human.push_summary("current", current.to_string());
            }
            emit_success(
                options,
                "note rm",
                &serde_json::json!({ "id": id, "removed": removed }),
                Some(&human),
            )
        }

        NoteCommands::Export { output } => run_export(app, output, options),
    }
}

fn run_export(app: &App, output: Option<PathBuf>, options: OutputOptions) -> Result<()> {
    let now = Utc::now();
    let notes = &app.store().notes;
    let path = output
        .unwrap_or_else(|| PathBuf::from(format!("notebook_{}.md", now.format("%Y-%m-%d"))));

    let document = note::export_markdown(notes, now);
    std::fs::write(&path, document)?;

    let mut human = HumanOutput::new("tbx note export: notebook written");
    human.push_summary("path", path.display().to_string());
    human.push_summary("notes", notes.len().to_string());
    if notes.is_empty() {
        human.push_warning("notebook is empty".to_string());
    }
    emit_success(
        options,
        "note export",
        &serde_json::json!({ "path": path, "notes": notes.len() }),
        Some(&human),
    )
}

/// Append lines from stdin to the note, autosaving after a quiet window
/// and on a periodic tick, then flushing at end of input.
fn run_append_session(app: &mut App, id: u64, options: OutputOptions) -> Result<()> {
    let existing = app.note(id)?.clone();
    let config = Config::load(&app.storage().config_file())?;

    let mut debouncer = Debouncer::new(Duration::from_secs(config.autosave.note_debounce_secs));
    let mut periodic = PeriodicTimer::new(
        Duration::from_secs(config.autosave.store_interval_secs),
        Instant::now(),
    );

    let mut content = existing.content.clone();
    let mut lines_read = 0usize;

    if !options.quiet && !options.json {
        eprintln!("appending to note {id}; end input (Ctrl-D) to finish");
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(&line);
        lines_read += 1;

        // the deadline armed by the previous line must be checked before
        // this line re-arms it, or a quiet gap can never fire
        let now = Instant::now();
        if debouncer.fire_if_due(now) || periodic.tick(now) {
            app.save_note(id, &existing.title, &content, Utc::now())?;
        }
        debouncer.poke(now);
    }

    // flush: cancel the pending deadline and save synchronously once
    if debouncer.flush() || lines_read > 0 {
        app.save_note(id, &existing.title, &content, Utc::now())?;
    }

    let note = app.note(id)?.clone();
    let mut human = HumanOutput::new("tbx note edit: note saved");
    human.push_summary("id", note.id.to_string());
    human.push_summary("lines appended", lines_read.to_string());
    emit_success(options, "note edit", &note, Some(&human))
}

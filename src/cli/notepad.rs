//! tbx notepad commands

use std::io::Read;

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::NotepadCommands;

#[derive(serde::Serialize)]
struct NotepadReport<'a> {
    compare_mode: bool,
    pane1: &'a str,
    pane2: &'a str,
}

pub fn run(app: &mut App, command: NotepadCommands, options: OutputOptions) -> Result<()> {
    match command {
        NotepadCommands::Show => {
            let store = app.store();
            let report = NotepadReport {
                compare_mode: store.notepad_compare_mode,
                pane1: &store.notepad_content1,
                pane2: &store.notepad_content2,
            };

            let mut human = HumanOutput::new("tbx notepad show");
            human.push_summary(
                "compare mode",
                if report.compare_mode { "on" } else { "off" },
            );
            human.push_summary("pane 1", format!("{} chars", report.pane1.chars().count()));
            human.push_summary("pane 2", format!("{} chars", report.pane2.chars().count()));
            if !report.pane1.is_empty() {
                human.push_detail(format!("pane 1:\n{}", report.pane1));
            }
            if !report.pane2.is_empty() {
                human.push_detail(format!("pane 2:\n{}", report.pane2));
            }
            emit_success(options, "notepad show", &report, Some(&human))
        }

        NotepadCommands::Set { pane, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            app.set_notepad(pane, &content)?;

            let mut human = HumanOutput::new("tbx notepad set: pane saved");
            human.push_summary("pane", pane.to_string());
            human.push_summary("length", content.chars().count().to_string());
            emit_success(
                options,
                "notepad set",
                &serde_json::json!({ "pane": pane, "length": content.chars().count() }),
                Some(&human),
            )
        }

        NotepadCommands::Compare { enabled } => {
            app.set_compare_mode(enabled)?;
            let mut human = HumanOutput::new("tbx notepad compare: mode saved");
            human.push_summary("compare mode", if enabled { "on" } else { "off" });
            emit_success(
                options,
                "notepad compare",
                &serde_json::json!({ "compareMode": enabled }),
                Some(&human),
            )
        }
    }
}

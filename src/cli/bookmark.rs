//! tbx bookmark commands

use chrono::Utc;

use crate::app::App;
use crate::confirm::Confirm;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::BookmarkCommands;

pub fn run(
    app: &mut App,
    command: BookmarkCommands,
    options: OutputOptions,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    match command {
        BookmarkCommands::Add { name, url, color } => {
            let bookmark = app
                .add_bookmark(&name, &url, color.as_deref(), Utc::now())?
                .clone();

            let mut human = HumanOutput::new("tbx bookmark add: bookmark created");
            human.push_summary("id", bookmark.id.to_string());
            human.push_summary("name", bookmark.name.clone());
            human.push_summary("url", bookmark.url.clone());
            emit_success(options, "bookmark add", &bookmark, Some(&human))
        }

        BookmarkCommands::List => {
            let bookmarks = &app.store().bookmarks;
            let mut human = HumanOutput::new(format!(
                "tbx bookmark list: {} bookmark(s)",
                bookmarks.len()
            ));
            for bookmark in bookmarks {
                human.push_detail(format!(
                    "{} {} - {} ({})",
                    bookmark.id, bookmark.name, bookmark.url, bookmark.color
                ));
            }
            emit_success(options, "bookmark list", bookmarks, Some(&human))
        }

        BookmarkCommands::Rm { id } => {
            let removed = app.remove_bookmark(id, confirm)?;
            let header = if removed {
                "tbx bookmark rm: bookmark deleted"
            } else {
                "tbx bookmark rm: cancelled"
            };
            let mut human = HumanOutput::new(header);
            human.push_summary("id", id.to_string());
            emit_success(
                options,
                "bookmark rm",
                &serde_json::json!({ "id": id, "removed": removed }),
                Some(&human),
            )
        }
    }
}

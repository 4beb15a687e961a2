//! Command-line interface for tbx
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::App;
use crate::config::Config;
use crate::confirm::{AssumeYes, Confirm, StdinConfirm};
use crate::error::Result;
use crate::output::OutputOptions;
use crate::storage::Storage;
use crate::task::SortMode;

mod bookmark;
mod layout;
mod note;
mod notepad;
mod settings;
mod task;

/// tbx - personal toolbox
///
/// Tasks, bookmarks, a notebook and a dual-pane notepad, persisted to a
/// single local JSON slot with export/import of everything.
#[derive(Parser, Debug)]
#[command(name = "tbx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TBX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task list management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Bookmark management
    #[command(subcommand)]
    Bookmark(BookmarkCommands),

    /// Notebook management
    #[command(subcommand)]
    Note(NoteCommands),

    /// Dual-pane notepad
    #[command(subcommand)]
    Notepad(NotepadCommands),

    /// Panel layout order
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// Export all data to a backup file
    Export {
        /// Output path (defaults to a date-stamped file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a backup file, overwriting all data
    Import {
        /// Backup file produced by `tbx export`
        file: PathBuf,
    },

    /// Clear all data (asks twice)
    Reset,

    /// Show data usage: slot sizes, counts and version
    Usage,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        name: String,

        /// Difficulty 1-4
        #[arg(short, long, default_value_t = 1)]
        difficulty: u8,

        /// Deadline: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD"
        #[arg(long)]
        deadline: String,

        /// Implementation complexity 1-4
        #[arg(short, long, default_value_t = 1)]
        implementation: u8,
    },

    /// List tasks in the current (or given) order
    List {
        /// Override the stored sort mode for this listing
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
    },

    /// Toggle a task's completion
    Toggle { id: i64 },

    /// Delete a task
    Rm { id: i64 },

    /// Set the stored sort mode
    Sort {
        #[arg(value_enum)]
        mode: SortMode,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookmarkCommands {
    /// Add a bookmark (bare hosts get an https:// prefix)
    Add {
        name: String,
        url: String,

        /// Tile color as a hex string
        #[arg(long)]
        color: Option<String>,
    },

    /// List bookmarks
    List,

    /// Delete a bookmark
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Create an empty note and make it current
    New,

    /// List notes, most recently updated first
    List {
        /// Filter by a case-insensitive substring over title and content
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one note in full
    Show { id: u64 },

    /// Edit a note; with no flags, appends lines read from stdin with
    /// debounced autosave
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },

    /// Make a note the current one
    Select { id: u64 },

    /// Delete a note
    Rm { id: u64 },

    /// Export all notes to a markdown document
    Export {
        /// Output path (defaults to a date-stamped file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotepadCommands {
    /// Show both panes and the compare-mode flag
    Show,

    /// Set a pane's content (reads stdin when no content is given)
    Set {
        /// Pane number: 1 or 2
        pane: u8,

        content: Option<String>,
    },

    /// Toggle compare mode on or off
    Compare {
        #[arg(value_parser = parse_on_off)]
        enabled: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommands {
    /// Show the panel order
    Show,

    /// Set the panel order (must name all six panels)
    Set {
        #[arg(required = true)]
        panels: Vec<String>,
    },

    /// Return to the default panel order
    Reset,
}

fn parse_on_off(value: &str) -> std::result::Result<bool, String> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(format!("expected on/off, got {other}")),
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        let storage = Storage::resolve(self.data_dir)?;
        let mut stdin_confirm = StdinConfirm;
        let mut assume_yes = AssumeYes;
        let confirm: &mut dyn Confirm = if self.yes {
            &mut assume_yes
        } else {
            &mut stdin_confirm
        };

        match self.command {
            Commands::Task(command) => {
                let mut app = load_app(storage, options)?;
                task::run(&mut app, command, options, confirm)
            }
            Commands::Bookmark(command) => {
                let mut app = load_app(storage, options)?;
                bookmark::run(&mut app, command, options, confirm)
            }
            Commands::Note(command) => {
                let mut app = load_app(storage, options)?;
                note::run(&mut app, command, options, confirm)
            }
            Commands::Notepad(command) => {
                let mut app = load_app(storage, options)?;
                notepad::run(&mut app, command, options)
            }
            Commands::Layout(command) => {
                let mut app = load_app(storage, options)?;
                layout::run(&mut app, command, options)
            }
            Commands::Export { output } => settings::run_export(&storage, output, options),
            Commands::Import { file } => settings::run_import(&storage, &file, options, confirm),
            Commands::Reset => {
                let mut app = load_app(storage, options)?;
                settings::run_reset(&mut app, options, confirm)
            }
            Commands::Usage => settings::run_usage(&storage, options),
        }
    }
}

/// Rehydrate the app, apply the configured default sort to a first run,
/// and surface any one-time migration notices.
fn load_app(storage: Storage, options: OutputOptions) -> Result<App> {
    let config = Config::load(&storage.config_file())?;
    let mut app = App::load(storage)?;
    app.apply_default_sort(config.default_sort);
    if !options.quiet && !options.json {
        for notice in app.take_notices() {
            eprintln!("notice: {notice}");
        }
    }
    Ok(app)
}

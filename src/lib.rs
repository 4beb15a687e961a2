//! tbx - Personal Toolbox Library
//!
//! Core functionality for the tbx CLI: a task list, bookmark collection,
//! multi-note notebook and dual-pane notepad, all persisted to a single
//! local JSON slot with a versioned migration gate and an export/import
//! protocol.
//!
//! # Core Concepts
//!
//! - **Persisted slot**: one JSON document holding the whole application
//!   state, rewritten wholesale on every mutation
//! - **Version gate**: on load, a mismatched format version discards only
//!   the derived panel layout; user content always survives
//! - **Export/import**: a portable backup document with confirmation,
//!   in-memory backup and rollback on write failure
//!
//! # Module Organization
//!
//! - `app`: application state owning the collections, every mutation persists
//! - `autosave`: debounced and periodic save timers
//! - `bookmark`, `note`, `task`: the entity collections
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `tbx.toml`
//! - `confirm`: injected confirmation capability for destructive actions
//! - `error`: error types and result aliases
//! - `layout`: panel order defaults and validation
//! - `migrate`: the pure load-time version gate
//! - `output`: human and JSON output formatting
//! - `storage`: slot paths and atomic file writes
//! - `store`: the persisted root aggregate
//! - `transfer`: export/import protocol
//! - `usage`: data usage reporting

pub mod app;
pub mod autosave;
pub mod bookmark;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod layout;
pub mod migrate;
pub mod note;
pub mod output;
pub mod storage;
pub mod store;
pub mod task;
pub mod transfer;
pub mod usage;

pub use error::{Error, Result};

//! Error types for tbx
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown id, malformed import file)
//! - 4: Operation failed (io error, failed slot write)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tbx CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tbx operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(i64),

    #[error("Note not found: {0}")]
    NoteNotFound(u64),

    #[error("Not a valid toolbox backup: {0}")]
    ImportMalformed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("Import failed while writing (previous data restored): {0}")]
    ImportWriteFailed(String),

    #[error("No data directory available for {0}")]
    NoDataDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_)
            | Error::TaskNotFound(_)
            | Error::BookmarkNotFound(_)
            | Error::NoteNotFound(_)
            | Error::ImportMalformed(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::ImportWriteFailed(_)
            | Error::NoDataDir(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for tbx operations
pub type Result<T> = std::result::Result<T, Error>;

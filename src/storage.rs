//! Storage layer for tbx
//!
//! All state lives in two slots inside one data directory:
//!
//! ```text
//! <data-dir>/
//!   toolbox.json   # the persisted store (whole application state)
//!   layout.json    # panel order, disposable derived state
//!   tbx.toml       # optional config
//! ```
//!
//! Writes are atomic (temp file + rename) so a reader never observes a
//! partial slot.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// File name of the persisted store slot
pub const STORE_SLOT: &str = "toolbox.json";

/// File name of the layout slot
pub const LAYOUT_SLOT: &str = "layout.json";

/// File name of the optional config file
pub const CONFIG_FILE: &str = "tbx.toml";

/// Storage manager for the tbx data directory
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at an explicit directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve storage from an optional override, falling back to the
    /// platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = data_dir {
            return Ok(Self::new(dir));
        }

        let dirs = directories::ProjectDirs::from("", "", "tbx")
            .ok_or_else(|| Error::NoDataDir(PathBuf::from("~")))?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the persisted store slot
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(STORE_SLOT)
    }

    /// Path to the layout slot
    pub fn layout_file(&self) -> PathBuf {
        self.data_dir.join(LAYOUT_SLOT)
    }

    /// Path to the config file
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Create the data directory if needed
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    // =========================================================================
    // Slot I/O (atomic writes)
    // =========================================================================

    /// Read a slot's raw contents; `None` when the slot does not exist
    pub fn read_raw(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write raw data atomically using temp file + rename.
    ///
    /// The slot is either fully replaced or untouched; readers never see a
    /// partial write.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Serialize and atomically write JSON data
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Read and parse JSON data from a slot
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&contents)?;
        Ok(data)
    }

    /// Remove a slot; absent slots are fine
    pub fn clear(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Restore a slot to a previously captured raw value (`None` removes it)
    pub fn restore_raw(&self, path: &Path, backup: Option<&str>) -> Result<()> {
        match backup {
            Some(contents) => self.write_atomic(path, contents.as_bytes()),
            None => self.clear(path),
        }
    }

    /// Size of a slot in bytes, zero when absent
    pub fn slot_size(&self, path: &Path) -> u64 {
        fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slot_paths() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        assert_eq!(storage.store_file(), temp.path().join("toolbox.json"));
        assert_eq!(storage.layout_file(), temp.path().join("layout.json"));
        assert_eq!(storage.config_file(), temp.path().join("tbx.toml"));
    }

    #[test]
    fn atomic_json_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());

        #[derive(Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Payload {
            name: String,
            value: i32,
        }

        let data = Payload {
            name: "test".to_string(),
            value: 42,
        };

        let path = storage.store_file();
        storage.write_json(&path, &data).unwrap();
        let read_back: Payload = storage.read_json(&path).unwrap();
        assert_eq!(data, read_back);

        // no temp file left behind
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn read_raw_absent_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        assert!(storage.read_raw(&storage.store_file()).unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        let path = storage.layout_file();

        storage.write_atomic(&path, b"[]").unwrap();
        storage.clear(&path).unwrap();
        assert!(!path.exists());
        storage.clear(&path).unwrap();
    }

    #[test]
    fn restore_raw_round_trips_and_removes() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        let path = storage.store_file();

        storage.write_atomic(&path, b"original").unwrap();
        let backup = storage.read_raw(&path).unwrap();

        storage.write_atomic(&path, b"overwritten").unwrap();
        storage.restore_raw(&path, backup.as_deref()).unwrap();
        assert_eq!(storage.read_raw(&path).unwrap().unwrap(), "original");

        storage.restore_raw(&path, None).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn slot_size_reports_bytes() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        let path = storage.store_file();
        assert_eq!(storage.slot_size(&path), 0);
        storage.write_atomic(&path, b"12345").unwrap();
        assert_eq!(storage.slot_size(&path), 5);
    }
}

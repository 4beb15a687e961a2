//! Application state and mutations.
//!
//! `App` owns the in-memory collections and the storage handle. Every
//! mutating operation rewrites the full store slot, so the persisted
//! document is always a complete snapshot. Destructive operations go
//! through the injected confirmation capability.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::bookmark::{self, Bookmark};
use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::layout;
use crate::migrate;
use crate::note::{self, Note};
use crate::storage::Storage;
use crate::store::{PersistedStore, DATA_VERSION};
use crate::task::{self, SortMode, Task};

/// The running application: collections, layout and the slot they
/// persist to.
#[derive(Debug)]
pub struct App {
    storage: Storage,
    store: PersistedStore,
    layout: Vec<String>,
    notices: Vec<String>,
    /// True when no store slot existed at load time
    fresh: bool,
}

impl App {
    /// Rehydrate from storage, running the version gate. A discarded
    /// layout is removed from its slot immediately; notices are kept for
    /// the caller to surface once.
    pub fn load(storage: Storage) -> Result<Self> {
        let raw_store = storage.read_raw(&storage.store_file())?;
        let raw_layout = storage.read_raw(&storage.layout_file())?;

        let migration = migrate::migrate(
            raw_store.as_deref(),
            raw_layout.as_deref(),
            DATA_VERSION,
        );

        if migration.layout_discarded {
            storage.clear(&storage.layout_file())?;
        }

        Ok(Self {
            storage,
            fresh: raw_store.is_none(),
            store: migration.store,
            layout: migration.layout,
            notices: migration.notices,
        })
    }

    /// Apply the configured sort mode, but only to a store that has
    /// never been persisted; a stored choice always wins. In-memory
    /// only, written out with the next mutation.
    pub fn apply_default_sort(&mut self, mode: SortMode) {
        if self.fresh {
            self.store.current_sort = mode;
        }
    }

    pub fn store(&self) -> &PersistedStore {
        &self.store
    }

    pub fn layout(&self) -> &[String] {
        &self.layout
    }

    /// One-time notices produced during load
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Write the complete current state to the store slot
    pub fn save(&self) -> Result<()> {
        debug!("persisting full store snapshot");
        self.storage.init()?;
        self.storage
            .write_json(&self.storage.store_file(), &self.store)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub fn add_task(
        &mut self,
        name: &str,
        difficulty: u8,
        deadline: DateTime<Utc>,
        implementation: u8,
        now: DateTime<Utc>,
    ) -> Result<&Task> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("task name is empty".to_string()));
        }
        task::validate_rating("difficulty", difficulty)?;
        task::validate_rating("implementation", implementation)?;

        // creation-timestamp id, bumped on collision so ids stay unique
        let mut id = now.timestamp_millis();
        while self.store.tasks.iter().any(|task| task.id == id) {
            id += 1;
        }

        self.store.tasks.push(Task {
            id,
            name: name.trim().to_string(),
            difficulty,
            deadline,
            implementation,
            completed: false,
            created_at: now,
        });
        self.save()?;
        Ok(self.store.tasks.last().expect("just pushed"))
    }

    /// Flip completion; returns the new state
    pub fn toggle_task(&mut self, id: i64) -> Result<bool> {
        let task = self
            .store
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.save()?;
        Ok(completed)
    }

    /// Delete after confirmation; returns false when declined
    pub fn remove_task(&mut self, id: i64, confirm: &mut dyn Confirm) -> Result<bool> {
        if !self.store.tasks.iter().any(|task| task.id == id) {
            return Err(Error::TaskNotFound(id));
        }
        if !confirm.confirm("Delete this task?") {
            return Ok(false);
        }
        self.store.tasks.retain(|task| task.id != id);
        self.save()?;
        Ok(true)
    }

    pub fn set_sort(&mut self, mode: SortMode) -> Result<()> {
        self.store.current_sort = mode;
        self.save()
    }

    /// Tasks ordered by the store's current sort mode, scored at `now`
    pub fn sorted_tasks(&self, now: DateTime<Utc>) -> Vec<Task> {
        let mut tasks = self.store.tasks.clone();
        task::sort_tasks(&mut tasks, self.store.current_sort, now);
        tasks
    }

    // =========================================================================
    // Bookmarks
    // =========================================================================

    pub fn add_bookmark(
        &mut self,
        name: &str,
        url: &str,
        color: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&Bookmark> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("bookmark name is empty".to_string()));
        }
        if url.trim().is_empty() {
            return Err(Error::InvalidArgument("bookmark url is empty".to_string()));
        }

        let mut id = now.timestamp_millis();
        while self.store.bookmarks.iter().any(|b| b.id == id) {
            id += 1;
        }

        self.store.bookmarks.push(Bookmark {
            id,
            name: name.trim().to_string(),
            url: bookmark::normalize_url(url),
            color: color.unwrap_or(bookmark::DEFAULT_COLOR).to_string(),
            created_at: now,
        });
        self.save()?;
        Ok(self.store.bookmarks.last().expect("just pushed"))
    }

    pub fn remove_bookmark(&mut self, id: i64, confirm: &mut dyn Confirm) -> Result<bool> {
        if !self.store.bookmarks.iter().any(|b| b.id == id) {
            return Err(Error::BookmarkNotFound(id));
        }
        if !confirm.confirm("Delete this bookmark?") {
            return Ok(false);
        }
        self.store.bookmarks.retain(|b| b.id != id);
        self.save()?;
        Ok(true)
    }

    // =========================================================================
    // Notebook
    // =========================================================================

    /// Create an empty note with the next id and make it current
    pub fn create_note(&mut self, now: DateTime<Utc>) -> Result<&Note> {
        let id = self.store.next_note_id;
        self.store.next_note_id += 1;
        self.store.notes.push(Note::new(id, now));
        self.store.current_note_id = Some(id);
        self.save()?;
        Ok(self.store.notes.last().expect("just pushed"))
    }

    /// Store title and content, deriving a title when blank, and bump
    /// the updated timestamp.
    pub fn save_note(
        &mut self,
        id: u64,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let note = self
            .store
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        note.title = note::derive_title(title, content);
        note.content = content.to_string();
        note.updated_at = now;
        self.save()
    }

    /// Delete after confirmation. Selection falls to the first remaining
    /// note, or nothing when the notebook is empty.
    pub fn remove_note(&mut self, id: u64, confirm: &mut dyn Confirm) -> Result<bool> {
        if !self.store.notes.iter().any(|note| note.id == id) {
            return Err(Error::NoteNotFound(id));
        }
        if !confirm.confirm("Delete this note? This cannot be undone.") {
            return Ok(false);
        }

        self.store.notes.retain(|note| note.id != id);
        if self.store.current_note_id == Some(id) {
            self.store.current_note_id = self.store.notes.first().map(|note| note.id);
        }
        self.save()?;
        Ok(true)
    }

    pub fn select_note(&mut self, id: u64) -> Result<()> {
        if !self.store.notes.iter().any(|note| note.id == id) {
            return Err(Error::NoteNotFound(id));
        }
        self.store.current_note_id = Some(id);
        self.save()
    }

    pub fn note(&self, id: u64) -> Result<&Note> {
        self.store
            .notes
            .iter()
            .find(|note| note.id == id)
            .ok_or(Error::NoteNotFound(id))
    }

    /// Notes matching a query, most recently updated first
    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        let mut hits = note::filter(&self.store.notes, query);
        note::sort_recent(&mut hits);
        hits
    }

    // =========================================================================
    // Notepad
    // =========================================================================

    pub fn set_notepad(&mut self, pane: u8, content: &str) -> Result<()> {
        match pane {
            1 => self.store.notepad_content1 = content.to_string(),
            2 => self.store.notepad_content2 = content.to_string(),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "notepad pane must be 1 or 2, got {other}"
                )))
            }
        }
        self.save()
    }

    pub fn set_compare_mode(&mut self, enabled: bool) -> Result<()> {
        self.store.notepad_compare_mode = enabled;
        self.save()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Apply and persist a complete panel order.
    ///
    /// The store slot is written as well: a layout with no versioned
    /// store next to it would be discarded again on the next load.
    pub fn set_layout(&mut self, order: Vec<String>) -> Result<()> {
        layout::validate(&order)?;
        self.save()?;
        self.storage.write_json(&self.storage.layout_file(), &order)?;
        self.layout = order;
        Ok(())
    }

    /// Drop the stored layout and return to the default order
    pub fn reset_layout(&mut self) -> Result<()> {
        self.storage.clear(&self.storage.layout_file())?;
        self.layout = layout::default_order();
        Ok(())
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clear both slots and all in-memory state. Irreversible, so it
    /// takes two sequential confirmations; returns false when declined.
    pub fn reset_all(&mut self, confirm: &mut dyn Confirm) -> Result<bool> {
        if !confirm.confirm(
            "This clears ALL data: tasks, bookmarks, notes, notepad and layout. Continue?",
        ) {
            return Ok(false);
        }
        if !confirm.confirm("Last chance: really delete everything? Consider exporting a backup first.") {
            return Ok(false);
        }

        self.storage.clear(&self.storage.store_file())?;
        self.storage.clear(&self.storage.layout_file())?;
        self.store = PersistedStore::default();
        self.layout = layout::default_order();
        Ok(true)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

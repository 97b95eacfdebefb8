//! JSON file selection store.
//!
//! The record is small, so every save rewrites the whole file. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous record intact.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "selection": 2,
//!   "updated_at": 1760000000
//! }
//! ```

use crate::domain::error::{DialnavError, Result};
use crate::storage::backend::SelectionStore;
use crate::storage::models::SelectionRecord;
use std::path::{Path, PathBuf};

/// Selection store backed by a JSON file.
///
/// The file is read on every load rather than cached, so two surfaces sharing
/// a file see each other's last write.
#[derive(Debug, Clone)]
pub struct JsonSelectionStore {
    file_path: PathBuf,
}

impl JsonSelectionStore {
    /// Opens a store at `file_path`, creating parent directories.
    ///
    /// The file itself is only created on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dialnav::storage::{JsonSelectionStore, SelectionStore};
    /// use std::path::PathBuf;
    ///
    /// let mut store = JsonSelectionStore::new(PathBuf::from("/tmp/dialnav/selection.json"))?;
    /// store.save_selection(1)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing selection store");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { file_path })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_record(&self) -> Result<Option<SelectionRecord>> {
        if !self.file_path.exists() {
            tracing::debug!(path = ?self.file_path, "no stored selection");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let record: SelectionRecord = serde_json::from_str(&contents)
            .map_err(|e| DialnavError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = record.version,
            selection = record.selection,
            updated_at = record.updated_at,
            "loaded stored selection"
        );
        Ok(Some(record))
    }
}

impl SelectionStore for JsonSelectionStore {
    fn load_selection(&self) -> Result<Option<i64>> {
        let _span = tracing::debug_span!("json_load_selection").entered();
        Ok(self.read_record()?.map(|record| record.selection))
    }

    fn save_selection(&mut self, selection: i64) -> Result<()> {
        let _span = tracing::debug_span!("json_save_selection", selection).entered();

        let json = serde_json::to_string_pretty(&SelectionRecord::new(selection))
            .map_err(|e| DialnavError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("selection saved");
        Ok(())
    }
}

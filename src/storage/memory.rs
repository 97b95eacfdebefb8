//! Process-local selection store.

use crate::domain::error::Result;
use crate::storage::backend::SelectionStore;
use crate::storage::models::SelectionRecord;

/// Keeps the selection in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySelectionStore {
    record: Option<SelectionRecord>,
}

impl MemorySelectionStore {
    /// Creates a store pre-seeded with `selection`.
    #[must_use]
    pub fn with_selection(selection: i64) -> Self {
        Self {
            record: Some(SelectionRecord::new(selection)),
        }
    }

    /// The last record written, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&SelectionRecord> {
        self.record.as_ref()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load_selection(&self) -> Result<Option<i64>> {
        Ok(self.record.as_ref().map(|record| record.selection))
    }

    fn save_selection(&mut self, selection: i64) -> Result<()> {
        tracing::trace!(selection, "selection kept in memory");
        self.record = Some(SelectionRecord::new(selection));
        Ok(())
    }
}

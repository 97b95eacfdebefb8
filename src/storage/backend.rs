//! Persistence of the last manual selection.
//!
//! The navigation surface persists exactly one integer. Both operations are
//! fallible at the I/O boundary only; the router logs a failed load and starts
//! on the default page.

use crate::domain::error::Result;

/// Key-value style store for the last manually selected page.
///
/// # Implementations
///
/// - [`JsonSelectionStore`](crate::storage::JsonSelectionStore): JSON file with atomic writes
/// - [`MemorySelectionStore`](crate::storage::MemorySelectionStore): process-local, for tests and hosts without disk
///
/// # Examples
///
/// ```
/// use dialnav::storage::{MemorySelectionStore, SelectionStore};
///
/// let mut store = MemorySelectionStore::default();
/// assert_eq!(store.load_selection()?, None);
///
/// store.save_selection(2)?;
/// assert_eq!(store.load_selection()?, Some(2));
/// # Ok::<(), dialnav::DialnavError>(())
/// ```
pub trait SelectionStore {
    /// Reads the stored selection, `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    fn load_selection(&self) -> Result<Option<i64>>;

    /// Replaces the stored selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_selection(&mut self, selection: i64) -> Result<()>;
}

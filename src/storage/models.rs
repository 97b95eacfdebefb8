//! On-disk record for the persisted selection.

use serde::{Deserialize, Serialize};

/// Current format version written by [`SelectionRecord::new`].
pub const RECORD_VERSION: u32 = 1;

/// The persisted manual selection.
///
/// `selection` is kept as the raw integer the surface wrote. It is range
/// checked against the page layout on restore, never on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Format version for future migrations.
    pub version: u32,

    /// Index of the last manually selected page.
    pub selection: i64,

    /// Unix timestamp of the write.
    pub updated_at: i64,
}

impl SelectionRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialnav::storage::SelectionRecord;
    ///
    /// let record = SelectionRecord::new(2);
    /// assert_eq!(record.selection, 2);
    /// assert!(record.updated_at > 0);
    /// ```
    #[must_use]
    pub fn new(selection: i64) -> Self {
        Self {
            version: RECORD_VERSION,
            selection,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

//! Error types for the navigation surface.
//!
//! The coordination components never fail: every misrouted or duplicate event
//! degrades to "no navigation change". Errors only exist at the boundaries the
//! surface talks to (the selection store, configuration parsing and the busy
//! probe) and are logged and recovered by the caller of those boundaries.

use thiserror::Error;

/// The main error type for dialnav boundary operations.
///
/// # Examples
///
/// ```
/// use dialnav::DialnavError;
///
/// fn parse_level() -> Result<(), DialnavError> {
///     Err(DialnavError::Config("trace_level must be a string".to_string()))
/// }
///
/// assert!(parse_level().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DialnavError {
    /// Reading or writing the persisted selection failed.
    ///
    /// The string describes the failing step (parse, serialize, missing file).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external busy signal could not be queried.
    ///
    /// Callers treat this as "not busy".
    #[error("Busy probe failed: {0}")]
    BusyProbe(String),

    /// A page index fell outside the fixed page set.
    #[error("Page index {index} out of range for {count} pages")]
    InvalidPage {
        /// The rejected index.
        index: i64,
        /// Number of pages in the layout.
        count: usize,
    },
}

/// A specialized `Result` type for dialnav boundary operations.
pub type Result<T> = std::result::Result<T, DialnavError>;

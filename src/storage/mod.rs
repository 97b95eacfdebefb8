//! Persistence of the last manually selected page.
//!
//! # Modules
//!
//! - `backend`: the [`SelectionStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation
//! - `models`: the on-disk record

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SelectionStore;
pub use json::JsonSelectionStore;
pub use memory::MemorySelectionStore;
pub use models::SelectionRecord;

//! Filesystem and environment lookups.
//!
//! The navigation core never touches the environment; only the binary and
//! [`Config`](crate::Config) resolve paths through here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, selection_file};

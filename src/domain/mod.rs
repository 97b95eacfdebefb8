//! Domain layer for the navigation surface.
//!
//! Core types with no knowledge of how events arrive or how actions are
//! executed.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`page`]: Page indices and the fixed page layout
//! - [`request`]: Externally delivered navigation requests
//!
//! # Examples
//!
//! ```
//! use dialnav::domain::{NavigationRequest, PageIndex, PageLayout};
//!
//! let layout = PageLayout::dialer();
//! let request = NavigationRequest::OpenPage { page: 2 };
//! assert!(request.explicit_target(PageIndex::PRIMARY, layout.len()).is_some());
//! ```

pub mod error;
pub mod page;
pub mod request;

pub use error::{DialnavError, Result};
pub use page::{PageIndex, PageLayout};
pub use request::NavigationRequest;

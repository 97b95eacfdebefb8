//! Actions the hosting surface must carry out.
//!
//! The components never touch the pager, the tab strip or the search surface
//! directly. They queue [`Action`]s, and every entry point hands the queued
//! actions back to the host, which executes them in order. Visibility changes
//! are different: they go straight to the page collaborators.
//!
//! # Example
//!
//! ```rust
//! use dialnav::{Action, PageIndex};
//!
//! let actions = vec![
//!     Action::ScrollTo { page: PageIndex::new(2), animate: true },
//!     Action::RefreshAffordances,
//! ];
//! assert!(actions.contains(&Action::RefreshAffordances));
//! ```

use crate::domain::PageIndex;
use serde::Serialize;

/// Commands for the hosting surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Move the pager container to `page`.
    ///
    /// `animate` is false for programmatic jumps.
    ScrollTo {
        /// Destination page.
        page: PageIndex,
        /// Whether to animate the move.
        animate: bool,
    },

    /// Highlight `page` in the tab strip.
    ///
    /// The host must not feed this selection back as a tap; if it does, the
    /// tap resolves to a reselect and is ignored.
    SelectTab {
        /// Tab to highlight.
        page: PageIndex,
    },

    /// Recompute tab and menu affordances.
    RefreshAffordances,

    /// Replace the pager with the search surface.
    ShowSearchSurface,

    /// Hide the search surface and restore tab navigation.
    HideSearchSurface,

    /// Give the search input focus (search entered while already active).
    FocusSearchInput,

    /// Move the surface to the background instead of closing it.
    ParkSurface,

    /// Let the enclosing navigation stack handle back.
    PropagateBack,

    /// Close the surface; another screen took over.
    FinishSurface,
}

//! Navigation layer: the state machine behind the pager, tab strip and
//! search overlay.
//!
//! # Components
//!
//! - [`router`]: [`NavigationRouter`], the single owner of [`NavigationState`]
//!   and the entry point for every host callback
//! - [`tracker`]: folds pager callbacks into the transition phase machine
//! - [`tabs`]: keeps the tab strip and the pager in agreement
//! - [`search`]: enters and leaves the search overlay
//! - [`collaborators`]: capability traits for pages, the search provider and
//!   the busy probe, plus the registry delivering visibility
//! - [`handler`]: [`Event`] values and [`handle_event`] dispatch
//!
//! # Visibility
//!
//! At most one page is visible at any time. A change is always delivered as
//! `false` to the old page before `true` to the new one, and a page never
//! receives the same value twice in a row. Commits, programmatic jumps and
//! search mode all go through the same registry, which is what makes those
//! guarantees hold no matter how events interleave.

pub mod actions;
pub mod affordances;
pub mod collaborators;
mod context;
pub mod directory;
pub mod handler;
pub mod modes;
pub mod router;
pub mod search;
pub mod state;
pub mod tabs;
pub mod tracker;

pub use actions::Action;
pub use affordances::Affordances;
pub use collaborators::{
    BusyProbe, FilterAware, NeverBusy, PageContent, PageRegistry, RequestAware,
    SearchContentProvider, VisibilityAware,
};
pub use directory::DirectorySearch;
pub use handler::{handle_event, Event};
pub use modes::{TransitionOrigin, TransitionPhase};
pub use router::NavigationRouter;
pub use search::SearchModeController;
pub use state::{Commit, NavigationState};
pub use tabs::TabSynchronizer;
pub use tracker::PagerTransitionTracker;

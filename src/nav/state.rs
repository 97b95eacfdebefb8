//! The single owned navigation state of a surface.
//!
//! [`NavigationState`] is created once per navigation surface from the
//! persisted manual selection, mutated only through the crate-internal
//! methods below, and reduced back to one integer at teardown. Readers get
//! the public getters; there is no public write path.
//!
//! # Invariants
//!
//! - Exactly one [`TransitionPhase`] holds at any time.
//! - `pending_page` is set iff the phase is not `Idle`.
//! - `current_page` only changes at commit time, never mid-drag.
//! - `last_manual_selection` only changes from a user-initiated, non-busy pick.

use super::modes::{TransitionOrigin, TransitionPhase};
use crate::domain::PageIndex;

/// Result of committing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    /// Page that was current before the commit.
    pub from: PageIndex,
    /// Page that is current now.
    pub to: PageIndex,
    /// Why the transition happened, if known.
    pub origin: Option<TransitionOrigin>,
}

impl Commit {
    /// Whether the commit moved to a different page.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Navigation bookkeeping shared by the tracker, tab synchronizer, search
/// controller and router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_page: PageIndex,
    pending_page: Option<PageIndex>,
    phase: TransitionPhase,
    origin: Option<TransitionOrigin>,
    last_manual_selection: PageIndex,
    search_active: bool,
    search_return_page: Option<PageIndex>,
    busy: bool,
}

impl NavigationState {
    /// Creates the state for a fresh surface showing `restored`.
    ///
    /// `restored` is the already clamped persisted manual selection.
    #[must_use]
    pub const fn new(restored: PageIndex) -> Self {
        Self {
            current_page: restored,
            pending_page: None,
            phase: TransitionPhase::Idle,
            origin: None,
            last_manual_selection: restored,
            search_active: false,
            search_return_page: None,
            busy: false,
        }
    }

    /// The page whose content is user-visible.
    #[must_use]
    pub const fn current_page(&self) -> PageIndex {
        self.current_page
    }

    /// The page an in-flight transition is heading to.
    #[must_use]
    pub const fn pending_page(&self) -> Option<PageIndex> {
        self.pending_page
    }

    /// Current transition phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Origin of the in-flight transition.
    #[must_use]
    pub const fn origin(&self) -> Option<TransitionOrigin> {
        self.origin
    }

    /// The last page the user explicitly chose.
    #[must_use]
    pub const fn last_manual_selection(&self) -> PageIndex {
        self.last_manual_selection
    }

    /// Whether the search overlay replaces the pager.
    #[must_use]
    pub const fn search_active(&self) -> bool {
        self.search_active
    }

    /// Page to return to when search mode ends.
    #[must_use]
    pub const fn search_return_page(&self) -> Option<PageIndex> {
        self.search_return_page
    }

    /// Last polled busy signal.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.busy
    }

    /// Value written back to the selection store at teardown.
    #[must_use]
    pub fn persisted_selection(&self) -> i64 {
        i64::try_from(self.last_manual_selection.get()).unwrap_or(0)
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Moves into `phase`, opening a transition if none is in flight.
    ///
    /// An already open transition keeps its pending page and origin, except
    /// that a drag always takes over the origin.
    pub(crate) fn begin(&mut self, phase: TransitionPhase, origin: TransitionOrigin) {
        debug_assert!(phase.in_flight());
        if !self.phase.in_flight() {
            self.pending_page = Some(self.current_page);
            self.origin = Some(origin);
        } else if phase == TransitionPhase::Dragging {
            self.origin = Some(TransitionOrigin::Drag);
        }
        self.phase = phase;
    }

    /// Points the in-flight transition at `page`; the last request wins.
    pub(crate) fn retarget(&mut self, page: PageIndex, origin: Option<TransitionOrigin>) {
        debug_assert!(self.phase.in_flight());
        self.pending_page = Some(page);
        if let Some(origin) = origin {
            self.origin = Some(origin);
        }
    }

    /// Closes the in-flight transition, making its destination current.
    ///
    /// Returns `None` when no transition was in flight.
    pub(crate) fn commit(&mut self) -> Option<Commit> {
        if !self.phase.in_flight() {
            return None;
        }

        let from = self.current_page;
        let to = self.pending_page.take().unwrap_or(from);
        self.current_page = to;
        self.phase = TransitionPhase::Idle;

        Some(Commit {
            from,
            to,
            origin: self.origin.take(),
        })
    }

    /// Moves straight to `page` without passing through a transition.
    pub(crate) fn jump(&mut self, page: PageIndex) -> Commit {
        let from = self.current_page;
        self.current_page = page;
        self.pending_page = None;
        self.phase = TransitionPhase::Idle;
        self.origin = None;
        Commit {
            from,
            to: page,
            origin: Some(TransitionOrigin::Programmatic),
        }
    }

    /// Drops any in-flight transition without committing it.
    pub(crate) fn abandon_transition(&mut self) -> bool {
        let was_in_flight = self.phase.in_flight();
        self.pending_page = None;
        self.phase = TransitionPhase::Idle;
        self.origin = None;
        was_in_flight
    }

    /// Records a user pick unless the surface is busy.
    pub(crate) fn remember_manual(&mut self, page: PageIndex) -> bool {
        if self.busy {
            return false;
        }
        self.last_manual_selection = page;
        true
    }

    /// Puts back a snapshot taken before a programmatic navigation.
    pub(crate) fn restore_manual(&mut self, page: PageIndex) {
        self.last_manual_selection = page;
    }

    pub(crate) fn enter_search(&mut self) {
        self.search_active = true;
        self.search_return_page = Some(self.current_page);
    }

    pub(crate) fn exit_search(&mut self) -> Option<PageIndex> {
        self.search_active = false;
        self.search_return_page.take()
    }
}

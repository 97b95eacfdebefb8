//! Pager transition tracking and the commit point.
//!
//! The pager container reports scroll phase changes and the page it is
//! settling on. [`PagerTransitionTracker`] folds those into the transition
//! phase machine and decides when a page change is committed:
//!
//! - **Commit point**: the return to `Idle` from any other phase. The page the
//!   container settled on becomes current and visibility moves from the old
//!   page to the new one (old first). The router then mirrors the commit in
//!   the tab strip and requests an affordance refresh, also for a commit that
//!   lands where it started and so sends no visibility.
//! - **Speculative flip**: a drag starting on the primary page hands
//!   visibility to the second page immediately, so controls tied to the
//!   primary page hide during the swipe rather than after it. The commit then
//!   only sends what is still needed: nothing if the swipe completed, a revert
//!   if it was cancelled.
//! - **Suspension**: while search mode is active the pager is hidden and its
//!   reports are ignored.

use super::actions::Action;
use super::context::NavContext;
use super::modes::{TransitionOrigin, TransitionPhase};
use super::state::Commit;
use crate::domain::PageIndex;

/// Folds pager callbacks into the transition phase machine.
#[derive(Debug, Default)]
pub struct PagerTransitionTracker {
    speculative: bool,
}

impl PagerTransitionTracker {
    /// Creates a tracker with no speculative flip outstanding.
    #[must_use]
    pub const fn new() -> Self {
        Self { speculative: false }
    }

    /// Whether a speculative flip is waiting for its commit.
    #[must_use]
    pub const fn speculative_flip_pending(&self) -> bool {
        self.speculative
    }

    /// Handles a scroll phase report from the container.
    ///
    /// Returns the commit when `phase` is `Idle` and closed a transition.
    pub(crate) fn on_scroll_phase_changed(
        &mut self,
        cx: &mut NavContext<'_>,
        phase: TransitionPhase,
    ) -> Option<Commit> {
        if cx.state.search_active() {
            tracing::debug!(?phase, "pager suspended by search mode, ignoring phase change");
            return None;
        }

        match phase {
            TransitionPhase::Idle => self.commit(cx),
            TransitionPhase::Dragging => {
                let starting = !cx.state.phase().in_flight();
                cx.state.begin(TransitionPhase::Dragging, TransitionOrigin::Drag);

                if starting && cx.state.current_page().is_primary() {
                    self.flip_speculatively(cx);
                }
                None
            }
            TransitionPhase::Settling => {
                cx.state.begin(TransitionPhase::Settling, TransitionOrigin::Programmatic);
                None
            }
        }
    }

    /// Handles the container reporting the page it is heading to.
    ///
    /// While a transition is in flight this only retargets it. A report with
    /// no transition open is a non-animated move and commits at once.
    pub(crate) fn on_page_settled(&mut self, cx: &mut NavContext<'_>, index: usize) -> Option<Commit> {
        if cx.state.search_active() {
            tracing::debug!(index, "pager suspended by search mode, ignoring settle");
            return None;
        }

        let Some(page) = cx.layout.page(index) else {
            tracing::warn!(index, pages = cx.layout.len(), "container settled on unknown page, ignoring");
            return None;
        };

        if !cx.state.phase().in_flight() {
            tracing::debug!(page = %page, "settle without transition, committing immediately");
            cx.state.begin(TransitionPhase::Settling, TransitionOrigin::Programmatic);
            cx.state.retarget(page, None);
            return self.commit(cx);
        }

        if cx.state.pending_page() == Some(page) {
            tracing::trace!(page = %page, "settle repeats pending page");
        } else {
            tracing::debug!(page = %page, previous = ?cx.state.pending_page(), "transition retargeted");
        }
        cx.state.retarget(page, None);
        None
    }

    /// Moves to `page` on behalf of the router.
    ///
    /// With a transition in flight the request only overwrites the pending
    /// page and the commit happens when the container goes idle. Otherwise
    /// the move commits immediately.
    pub(crate) fn jump(&mut self, cx: &mut NavContext<'_>, page: PageIndex) -> Option<Commit> {
        cx.push(Action::ScrollTo { page, animate: false });

        if cx.state.phase().in_flight() {
            tracing::debug!(page = %page, phase = ?cx.state.phase(), "programmatic move during transition, last request wins");
            cx.state.retarget(page, Some(TransitionOrigin::Programmatic));
            return None;
        }

        let commit = cx.state.jump(page);
        self.speculative = false;
        if !cx.state.search_active() {
            cx.pages.show(page);
        }
        Some(commit)
    }

    /// Drops an in-flight transition without touching visibility.
    ///
    /// Used when the pager is about to be hidden anyway.
    pub(crate) fn abandon(&mut self, cx: &mut NavContext<'_>) -> bool {
        self.speculative = false;
        cx.state.abandon_transition()
    }

    /// Drops an in-flight transition and gives visibility back to the
    /// current page if a speculative flip moved it.
    pub(crate) fn reset(&mut self, cx: &mut NavContext<'_>) -> bool {
        let flipped = self.speculative;
        let dropped = self.abandon(cx);
        if dropped {
            tracing::debug!(page = %cx.state.current_page(), "stale transition reset");
        }
        if flipped && !cx.state.search_active() {
            cx.pages.show(cx.state.current_page());
        }
        dropped
    }

    fn flip_speculatively(&mut self, cx: &mut NavContext<'_>) {
        let Some(next) = cx.layout.secondary_page() else {
            return;
        };

        tracing::debug!(from = %cx.state.current_page(), to = %next, "drag from primary page, flipping visibility early");
        cx.pages.show(next);
        self.speculative = true;
        cx.push(Action::RefreshAffordances);
    }

    fn commit(&mut self, cx: &mut NavContext<'_>) -> Option<Commit> {
        let Some(commit) = cx.state.commit() else {
            tracing::trace!("idle reported with no transition in flight");
            return None;
        };

        let sent = cx.pages.show(commit.to);
        self.speculative = false;

        tracing::debug!(
            from = %commit.from,
            to = %commit.to,
            origin = ?commit.origin,
            visibility_sent = sent,
            "transition committed"
        );
        Some(commit)
    }
}

//! Keeps the tab strip consistent with the pager.
//!
//! Two things move the selected tab: a committed page change (whatever caused
//! it) and the user tapping a tab. The first only mirrors the commit into the
//! tab strip and never starts another transition. The second starts an
//! animated move unless the tapped tab is already where the pager is going.
//!
//! A tab "tap" that arrives while the user is dragging is the tab strip
//! echoing the swipe, not a user choice, so it is ignored.

use super::actions::Action;
use super::context::NavContext;
use super::modes::{TransitionOrigin, TransitionPhase};
use super::state::Commit;

/// Mirrors commits into the tab strip and turns taps into transitions.
#[derive(Debug, Default)]
pub struct TabSynchronizer;

impl TabSynchronizer {
    /// Creates a synchronizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Selects the committed page's tab.
    ///
    /// A completed drag to another page counts as a manual selection; taps
    /// were already remembered when they happened, programmatic moves never
    /// are.
    pub(crate) fn on_page_committed(&mut self, cx: &mut NavContext<'_>, commit: Commit) {
        cx.push(Action::SelectTab { page: commit.to });

        if commit.changed() && commit.origin == Some(TransitionOrigin::Drag) {
            if cx.state.remember_manual(commit.to) {
                tracing::debug!(page = %commit.to, "completed drag remembered as manual selection");
            } else {
                tracing::debug!(page = %commit.to, "busy, completed drag not remembered");
            }
        }
    }

    /// Handles a tap on tab `index`.
    ///
    /// Returns whether the tap started or retargeted a transition.
    pub(crate) fn on_tab_tapped(&mut self, cx: &mut NavContext<'_>, index: usize) -> bool {
        if cx.state.search_active() {
            tracing::debug!(index, "tabs hidden by search mode, ignoring tap");
            return false;
        }

        let Some(page) = cx.layout.page(index) else {
            tracing::warn!(index, pages = cx.layout.len(), "tap on unknown tab, ignoring");
            return false;
        };

        let heading_to = match cx.state.phase() {
            TransitionPhase::Dragging => {
                tracing::debug!(page = %page, "tab selected during drag, treating as swipe echo");
                return false;
            }
            TransitionPhase::Settling => cx.state.pending_page(),
            TransitionPhase::Idle => Some(cx.state.current_page()),
        };

        if heading_to == Some(page) {
            tracing::debug!(page = %page, "tab reselected");
            return false;
        }

        cx.state.begin(TransitionPhase::Settling, TransitionOrigin::Tap);
        cx.state.retarget(page, Some(TransitionOrigin::Tap));

        if cx.state.remember_manual(page) {
            tracing::debug!(page = %page, "tab tap remembered as manual selection");
        } else {
            tracing::debug!(page = %page, "busy, tab tap not remembered");
        }

        cx.push(Action::ScrollTo { page, animate: true });
        cx.push(Action::RefreshAffordances);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageIndex;
    use crate::nav::context::fixture::Surface;

    fn page(index: usize) -> PageIndex {
        PageIndex::new(index)
    }

    #[test]
    fn tap_starts_animated_transition_and_is_remembered() {
        let mut surface = Surface::on(0);
        let mut tabs = TabSynchronizer::new();

        assert!(tabs.on_tab_tapped(&mut surface.cx(), 2));

        assert_eq!(surface.state.phase(), TransitionPhase::Settling);
        assert_eq!(surface.state.pending_page(), Some(page(2)));
        assert_eq!(surface.state.current_page(), page(0));
        assert_eq!(surface.state.last_manual_selection(), page(2));
        assert_eq!(
            surface.take_actions(),
            vec![Action::ScrollTo { page: page(2), animate: true }, Action::RefreshAffordances]
        );
        assert!(surface.visibility().is_empty());
    }

    #[test]
    fn reselecting_is_a_no_op() {
        let mut surface = Surface::on(1);
        let mut tabs = TabSynchronizer::new();

        assert!(!tabs.on_tab_tapped(&mut surface.cx(), 1));
        assert!(tabs.on_tab_tapped(&mut surface.cx(), 2));
        surface.take_actions();
        assert!(!tabs.on_tab_tapped(&mut surface.cx(), 2));
        assert!(surface.take_actions().is_empty());
    }

    #[test]
    fn tap_during_drag_is_a_swipe_echo() {
        let mut surface = Surface::on(1);
        let mut tabs = TabSynchronizer::new();
        surface.state.begin(TransitionPhase::Dragging, TransitionOrigin::Drag);

        assert!(!tabs.on_tab_tapped(&mut surface.cx(), 2));
        assert_eq!(surface.state.origin(), Some(TransitionOrigin::Drag));
        assert_eq!(surface.state.last_manual_selection(), page(1));
    }

    #[test]
    fn busy_tap_navigates_without_remembering() {
        let mut surface = Surface::on(1);
        let mut tabs = TabSynchronizer::new();
        surface.state.set_busy(true);

        assert!(tabs.on_tab_tapped(&mut surface.cx(), 2));
        assert_eq!(surface.state.pending_page(), Some(page(2)));
        assert_eq!(surface.state.last_manual_selection(), page(1));
    }

    #[test]
    fn commit_selects_tab_and_remembers_only_drags() {
        let mut surface = Surface::on(0);
        let mut tabs = TabSynchronizer::new();

        let programmatic = Commit { from: page(0), to: page(1), origin: Some(TransitionOrigin::Programmatic) };
        tabs.on_page_committed(&mut surface.cx(), programmatic);
        assert_eq!(surface.state.last_manual_selection(), page(0));

        let drag = Commit { from: page(1), to: page(2), origin: Some(TransitionOrigin::Drag) };
        tabs.on_page_committed(&mut surface.cx(), drag);
        assert_eq!(surface.state.last_manual_selection(), page(2));

        assert_eq!(
            surface.take_actions(),
            vec![Action::SelectTab { page: page(1) }, Action::SelectTab { page: page(2) }]
        );
    }

    #[test]
    fn search_mode_suspends_tabs() {
        let mut surface = Surface::on(1);
        let mut tabs = TabSynchronizer::new();
        surface.state.enter_search();

        assert!(!tabs.on_tab_tapped(&mut surface.cx(), 2));
        assert_eq!(surface.state.phase(), TransitionPhase::Idle);
    }
}

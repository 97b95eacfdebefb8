//! Borrowed view of a surface handed to the components for one event.

use super::actions::Action;
use super::collaborators::PageRegistry;
use super::state::NavigationState;
use crate::domain::PageLayout;

/// Everything a component may read or mutate while handling one event.
///
/// Built by the router from disjoint borrows of its own fields, which keeps
/// the router the single writer of [`NavigationState`].
pub(crate) struct NavContext<'a> {
    pub(crate) layout: &'a PageLayout,
    pub(crate) state: &'a mut NavigationState,
    pub(crate) pages: &'a mut PageRegistry,
    pub(crate) actions: &'a mut Vec<Action>,
}

impl NavContext<'_> {
    pub(crate) fn push(&mut self, action: Action) {
        self.actions.push(action);
    }
}

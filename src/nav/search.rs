//! Search mode: an overlay that temporarily replaces the pager.
//!
//! ```text
//!  Inactive ──enter()──► Active ──exit() / back──► Inactive
//! ```
//!
//! Search mode is orthogonal to the transition phase. Entering it drops any
//! transition in flight, takes visibility away from the current page and
//! remembers that page; leaving gives visibility back to exactly the
//! remembered page. While active, the pager and tab strip are suspended.
//!
//! The search content provider is created lazily by the host on its first
//! layout pass. Until it exists, `enter()` does nothing and the user simply
//! retries.

use super::actions::Action;
use super::collaborators::SearchContentProvider;
use super::context::NavContext;
use super::tracker::PagerTransitionTracker;
use std::fmt;

/// Owns the search content provider and drives search mode.
#[derive(Default)]
pub struct SearchModeController {
    provider: Option<Box<dyn SearchContentProvider>>,
}

impl SearchModeController {
    /// Creates a controller with no provider yet.
    #[must_use]
    pub fn new() -> Self {
        Self { provider: None }
    }

    /// Installs the provider. A second provider is refused.
    pub fn attach_provider(&mut self, provider: Box<dyn SearchContentProvider>) -> bool {
        if self.provider.is_some() {
            tracing::debug!("search provider already attached, ignoring");
            return false;
        }
        tracing::debug!("search provider attached");
        self.provider = Some(provider);
        true
    }

    /// Whether `enter()` can succeed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.provider.is_some()
    }

    /// Enters search mode.
    ///
    /// Returns false when already active (the host is asked to focus the
    /// search input instead) or when the provider does not exist yet.
    pub(crate) fn enter(&mut self, cx: &mut NavContext<'_>, tracker: &mut PagerTransitionTracker) -> bool {
        if cx.state.search_active() {
            tracing::debug!("search already active, focusing input");
            cx.push(Action::FocusSearchInput);
            return false;
        }

        let Some(provider) = self.provider.as_mut() else {
            tracing::debug!("search provider not ready, ignoring enter");
            return false;
        };

        if tracker.abandon(cx) {
            tracing::debug!("transition dropped on search entry");
        }

        let leaving = cx.state.current_page();
        if cx.state.remember_manual(leaving) {
            tracing::debug!(page = %leaving, "page left for search remembered as manual selection");
        }

        provider.set_query_string("", true);
        cx.pages.hide();
        cx.state.enter_search();

        tracing::debug!(return_page = %leaving, "search mode entered");
        cx.push(Action::ShowSearchSurface);
        cx.push(Action::RefreshAffordances);
        true
    }

    /// Leaves search mode, giving visibility back to the page it was entered
    /// from. Returns false when search was not active.
    pub(crate) fn exit(&mut self, cx: &mut NavContext<'_>, tracker: &mut PagerTransitionTracker) -> bool {
        if !cx.state.search_active() {
            return false;
        }

        let return_page = cx.state.exit_search().unwrap_or_else(|| cx.state.current_page());
        tracker.abandon(cx);
        cx.pages.show(return_page);

        tracing::debug!(return_page = %return_page, "search mode exited");
        cx.push(Action::HideSearchSurface);
        cx.push(Action::RefreshAffordances);
        true
    }

    /// Forwards the query text, empty text included.
    pub(crate) fn on_query_changed(&mut self, text: &str) -> bool {
        let Some(provider) = self.provider.as_mut() else {
            tracing::debug!("no search provider, dropping query");
            return false;
        };
        tracing::trace!(query = %text, "query forwarded");
        provider.set_query_string(text, true);
        true
    }

    /// Handles the close button of the search input.
    ///
    /// Clears a non-empty query; an empty one is left alone and search mode
    /// stays active.
    pub(crate) fn on_close(&mut self, current_query: &str) -> bool {
        if current_query.is_empty() {
            return false;
        }
        self.on_query_changed("")
    }

    /// Pushes a list filter to the provider if it takes one.
    pub(crate) fn apply_filter(&mut self, filter: &str) -> bool {
        let Some(target) = self.provider.as_mut().and_then(|provider| provider.list_filter()) else {
            return false;
        };
        target.set_filter_text(filter);
        true
    }
}

impl fmt::Debug for SearchModeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchModeController")
            .field("ready", &self.is_ready())
            .finish()
    }
}

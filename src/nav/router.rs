//! Top-level orchestration of a navigation surface.
//!
//! [`NavigationRouter`] owns the [`NavigationState`], the page collaborators
//! and the three components that react to events. Every entry point borrows
//! the pieces it needs into a short-lived context, lets the components react,
//! and returns the [`Action`]s they queued.
//!
//! # Resolving external requests
//!
//! In priority order:
//!
//! 1. Busy and the request is not a page-specific deep link → the busy page.
//! 2. The request names a page (dial, open page) → that page.
//! 3. The request asks for recent activity → the history page.
//! 4. Otherwise → the last manual selection.
//!
//! Applying a request never changes the remembered manual selection: it is
//! snapshotted before the move and put back afterwards.
//!
//! # Example
//!
//! ```rust
//! use dialnav::nav::NavigationRouter;
//! use dialnav::{Action, NavigationRequest, PageIndex, PageLayout};
//!
//! let mut router = NavigationRouter::new(PageLayout::dialer(), Some(2));
//! assert_eq!(router.state().current_page(), PageIndex::new(2));
//!
//! let actions = router.apply_external_request(&NavigationRequest::RecentActivity { call_key: false });
//! assert!(actions.contains(&Action::SelectTab { page: PageIndex::new(1) }));
//! assert_eq!(router.state().last_manual_selection(), PageIndex::new(2));
//! ```

use super::actions::Action;
use super::affordances::Affordances;
use super::collaborators::{BusyProbe, NeverBusy, PageContent, PageRegistry, SearchContentProvider};
use super::context::NavContext;
use super::modes::TransitionPhase;
use super::search::SearchModeController;
use super::state::{Commit, NavigationState};
use super::tabs::TabSynchronizer;
use super::tracker::PagerTransitionTracker;
use crate::domain::{NavigationRequest, PageIndex, PageLayout, Result};
use crate::storage::SelectionStore;
use std::fmt;

/// Owner of the navigation state and coordinator of its components.
pub struct NavigationRouter {
    layout: PageLayout,
    state: NavigationState,
    pages: PageRegistry,
    tracker: PagerTransitionTracker,
    tabs: TabSynchronizer,
    search: SearchModeController,
    busy_probe: Box<dyn BusyProbe>,
    filter_text: Option<String>,
    list_filter: Option<String>,
    outbox: Vec<Action>,
}

impl NavigationRouter {
    /// Creates a router showing the restored manual selection.
    ///
    /// `restored` is the raw persisted integer; `None` or an out-of-range
    /// value starts on the layout's default page. The starting page holds
    /// visibility from the outset, so pages attached later catch up.
    #[must_use]
    pub fn new(layout: PageLayout, restored: Option<i64>) -> Self {
        let start = restored.map_or(layout.default_page(), |stored| layout.clamp(stored));
        if let Some(stored) = restored {
            if usize::try_from(stored).ok() != Some(start.get()) {
                tracing::warn!(stored, fallback = %start, "persisted selection out of range, using default page");
            }
        }

        let mut pages = PageRegistry::new(layout.len());
        pages.show(start);

        tracing::debug!(page = %start, pages = layout.len(), "navigation surface created");

        Self {
            state: NavigationState::new(start),
            pages,
            tracker: PagerTransitionTracker::new(),
            tabs: TabSynchronizer::new(),
            search: SearchModeController::new(),
            busy_probe: Box::new(NeverBusy),
            filter_text: None,
            list_filter: None,
            outbox: Vec::new(),
            layout,
        }
    }

    /// Creates a router from whatever `store` holds.
    ///
    /// A store that cannot be read is logged and treated as empty.
    #[must_use]
    pub fn restore(layout: PageLayout, store: &dyn SelectionStore) -> Self {
        let restored = store.load_selection().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load persisted selection, using default page");
            None
        });
        Self::new(layout, restored)
    }

    /// Replaces the busy probe (defaults to never busy).
    #[must_use]
    pub fn with_busy_probe(mut self, probe: Box<dyn BusyProbe>) -> Self {
        self.busy_probe = probe;
        self
    }

    /// Attaches content to a page slot.
    ///
    /// Returns false, dropping `content`, for an index outside the layout.
    pub fn attach_page(&mut self, index: usize, content: Box<dyn PageContent>) -> bool {
        let Some(page) = self.layout.page(index) else {
            tracing::warn!(index, "attach to unknown page, ignoring");
            return false;
        };
        self.pages.attach(page, content).is_ok()
    }

    /// Attaches the search content provider, normally on the first layout pass.
    pub fn attach_search_provider(&mut self, provider: Box<dyn SearchContentProvider>) -> bool {
        let attached = self.search.attach_provider(provider);
        if attached {
            if let Some(filter) = self.list_filter.as_deref() {
                self.search.apply_filter(filter);
            }
        }
        attached
    }

    /// Read access to the navigation state.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The page layout this surface was built with.
    #[must_use]
    pub const fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The page currently holding visibility, if any.
    #[must_use]
    pub const fn visible_page(&self) -> Option<PageIndex> {
        self.pages.visible_page()
    }

    /// Whether search mode can be entered.
    #[must_use]
    pub fn search_ready(&self) -> bool {
        self.search.is_ready()
    }

    /// Menu affordances for the current state.
    #[must_use]
    pub fn affordances(&self, has_permanent_menu_key: bool) -> Affordances {
        Affordances::compute(&self.state, &self.layout, has_permanent_menu_key)
    }

    /// Pager callback: the scroll phase changed.
    pub fn on_scroll_phase_changed(&mut self, phase: TransitionPhase) -> Vec<Action> {
        let _span = tracing::debug_span!("on_scroll_phase_changed", ?phase).entered();

        if phase == TransitionPhase::Idle {
            self.poll_busy();
        }
        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        if let Some(commit) = self.tracker.on_scroll_phase_changed(&mut cx, phase) {
            Self::after_commit(&mut self.tabs, &mut cx, commit);
        }
        self.drain()
    }

    /// Pager callback: the container is settling on page `index`.
    pub fn on_page_settled(&mut self, index: usize) -> Vec<Action> {
        let _span = tracing::debug_span!("on_page_settled", index).entered();

        self.poll_busy();
        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        if let Some(commit) = self.tracker.on_page_settled(&mut cx, index) {
            Self::after_commit(&mut self.tabs, &mut cx, commit);
        }
        self.drain()
    }

    /// Tab strip callback: the user tapped tab `index`.
    pub fn on_tab_tapped(&mut self, index: usize) -> Vec<Action> {
        let _span = tracing::debug_span!("on_tab_tapped", index).entered();

        self.poll_busy();
        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        self.tabs.on_tab_tapped(&mut cx, index);
        self.drain()
    }

    /// Enters search mode; a silent no-op until the provider exists.
    pub fn enter_search(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("enter_search").entered();

        self.poll_busy();
        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        self.search.enter(&mut cx, &mut self.tracker);
        self.drain()
    }

    /// Leaves search mode.
    pub fn exit_search(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("exit_search").entered();

        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        self.search.exit(&mut cx, &mut self.tracker);
        self.drain()
    }

    /// Search input callback: the query text changed.
    pub fn on_query_changed(&mut self, text: &str) -> Vec<Action> {
        self.search.on_query_changed(text);
        self.drain()
    }

    /// Search input callback: the close button was pressed with `current_query`.
    pub fn on_search_close(&mut self, current_query: &str) -> Vec<Action> {
        self.search.on_close(current_query);
        self.drain()
    }

    /// Back navigation.
    ///
    /// Leaves search mode if active. Otherwise a surface at the root of its
    /// task is parked rather than closed, and anywhere else back propagates.
    pub fn on_back_pressed(&mut self, is_task_root: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("on_back_pressed", is_task_root).entered();

        if self.state.search_active() {
            return self.exit_search();
        }

        let action = if is_task_root {
            Action::ParkSurface
        } else {
            Action::PropagateBack
        };
        tracing::debug!(?action, "back escalated");
        self.outbox.push(action);
        self.drain()
    }

    /// Resolves `request` to a page, polling the busy signal first.
    pub fn resolve(&mut self, request: &NavigationRequest) -> PageIndex {
        self.poll_busy();
        self.resolve_polled(request)
    }

    /// Applies an externally delivered request.
    ///
    /// Search mode is left first, then the surface moves to the resolved page
    /// through the same commit path a swipe uses. The manual selection is
    /// unchanged afterwards. A request resolving to the current page with no
    /// transition in flight moves nothing.
    pub fn apply_external_request(&mut self, request: &NavigationRequest) -> Vec<Action> {
        let _span = tracing::debug_span!("apply_external_request", ?request).entered();

        let busy = self.poll_busy();

        if busy && matches!(request, NavigationRequest::RecentActivity { call_key: true }) {
            match self.busy_probe.show_call_screen() {
                Ok(true) => {
                    tracing::debug!("call key while busy, handing over to call screen");
                    self.outbox.push(Action::FinishSurface);
                    return self.drain();
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "failed to hand over to call screen"),
            }
        }

        if let Some(text) = request.filter_text() {
            tracing::debug!(filter = %text, "filter text stored for target page");
            self.filter_text = Some(text.to_string());
        }

        let target = self.resolve_polled(request);
        let saved = self.state.last_manual_selection();

        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };

        if self.search.exit(&mut cx, &mut self.tracker) {
            tracing::debug!("external request closed search mode");
        }

        if !cx.state.phase().in_flight() && cx.state.current_page() == target {
            tracing::debug!(page = %target, "already on resolved page");
        } else if let Some(commit) = self.tracker.jump(&mut cx, target) {
            Self::after_commit(&mut self.tabs, &mut cx, commit);
        }

        cx.state.restore_manual(saved);
        cx.pages.deliver(target, request);

        self.drain()
    }

    /// Returns the filter text of the last filter request, exactly once.
    pub fn take_filter_text(&mut self) -> Option<String> {
        self.filter_text.take()
    }

    /// Pushes a list filter to every page and the search provider.
    pub fn apply_list_filter(&mut self, filter: &str) -> Vec<Action> {
        self.list_filter = Some(filter.to_string());
        if self.push_list_filter() {
            self.outbox.push(Action::RefreshAffordances);
        }
        self.drain()
    }

    /// The surface came back to the foreground.
    ///
    /// Drops a transition the container never finished and re-applies the
    /// list filter.
    pub fn on_resume(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("on_resume").entered();

        let mut cx = NavContext {
            layout: &self.layout,
            state: &mut self.state,
            pages: &mut self.pages,
            actions: &mut self.outbox,
        };
        if self.tracker.reset(&mut cx) {
            cx.push(Action::RefreshAffordances);
        }
        self.push_list_filter();
        self.drain()
    }

    /// Writes the manual selection to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the caller decides whether to log it.
    pub fn persist(&self, store: &mut dyn SelectionStore) -> Result<()> {
        let selection = self.state.persisted_selection();
        tracing::debug!(selection, "persisting manual selection");
        store.save_selection(selection)
    }

    fn after_commit(tabs: &mut TabSynchronizer, cx: &mut NavContext<'_>, commit: Commit) {
        tabs.on_page_committed(cx, commit);
        cx.push(Action::RefreshAffordances);
    }

    fn resolve_polled(&self, request: &NavigationRequest) -> PageIndex {
        let explicit = request.explicit_target(PageIndex::PRIMARY, self.layout.len());

        let (page, reason) = if self.state.busy() && explicit.is_none() {
            (self.layout.busy_page(), "busy")
        } else if let Some(page) = explicit {
            (page, "explicit")
        } else if request.is_recent_activity() {
            (self.layout.history_page(), "recent_activity")
        } else {
            (self.state.last_manual_selection(), "last_manual")
        };

        tracing::debug!(page = %page, reason, "request resolved");
        page
    }

    fn poll_busy(&mut self) -> bool {
        let busy = self.busy_probe.is_busy().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "busy probe failed, assuming not busy");
            false
        });
        if busy != self.state.busy() {
            tracing::debug!(busy, "busy signal changed");
        }
        self.state.set_busy(busy);
        busy
    }

    fn push_list_filter(&mut self) -> bool {
        let Some(filter) = self.list_filter.as_deref() else {
            return false;
        };
        let pages = self.pages.apply_filter(filter);
        let search = self.search.apply_filter(filter);
        tracing::debug!(filter, pages, search, "list filter applied");
        pages > 0 || search
    }

    fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }
}

impl fmt::Debug for NavigationRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRouter")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("pages", &self.pages)
            .field("search", &self.search)
            .field("filter_text", &self.filter_text)
            .finish_non_exhaustive()
    }
}

//! Event dispatch for hosts that deliver callbacks as values.
//!
//! A host can call the router's entry points directly, or funnel everything
//! through [`handle_event`], which is what the replay binary does. Events are
//! deserializable so recorded sessions can be replayed from JSON lines.
//!
//! # Example
//!
//! ```rust
//! use dialnav::nav::{handle_event, Event, NavigationRouter, TransitionPhase};
//! use dialnav::{Action, PageLayout};
//!
//! let mut router = NavigationRouter::new(PageLayout::dialer(), None);
//! let actions = handle_event(&mut router, &Event::TabTapped { index: 1 });
//! assert!(actions.contains(&Action::RefreshAffordances));
//!
//! handle_event(&mut router, &Event::PageSettled { index: 1 });
//! handle_event(&mut router, &Event::ScrollPhaseChanged { phase: TransitionPhase::Idle });
//! assert_eq!(router.state().current_page().get(), 1);
//! ```

use super::actions::Action;
use super::modes::TransitionPhase;
use super::router::NavigationRouter;
use crate::domain::NavigationRequest;
use serde::Deserialize;

/// Callbacks a host delivers to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The pager's scroll phase changed.
    ScrollPhaseChanged {
        /// New phase.
        phase: TransitionPhase,
    },

    /// The pager is settling on a page.
    PageSettled {
        /// Raw page index reported by the container.
        index: usize,
    },

    /// A tab was tapped.
    TabTapped {
        /// Raw tab index.
        index: usize,
    },

    /// The user asked for search.
    EnterSearch,

    /// The user left search from the up affordance.
    ExitSearch,

    /// The search query changed.
    QueryChanged {
        /// Current query text.
        text: String,
    },

    /// The close button of the search input was pressed.
    SearchClosed {
        /// Query at the time of the press.
        query: String,
    },

    /// Back navigation.
    BackPressed {
        /// Whether the surface is the root of its task.
        #[serde(default)]
        is_task_root: bool,
    },

    /// An external navigation request arrived.
    ExternalRequest {
        /// The request.
        request: NavigationRequest,
    },

    /// The list filter changed.
    ListFilterChanged {
        /// New filter.
        filter: String,
    },

    /// The surface returned to the foreground.
    Resume,
}

/// Dispatches `event` to the router and returns the actions to execute.
///
/// Never fails: unknown pages, duplicate callbacks and events arriving in
/// the wrong mode all degrade to fewer (or no) actions.
pub fn handle_event(router: &mut NavigationRouter, event: &Event) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let actions = match event {
        Event::ScrollPhaseChanged { phase } => router.on_scroll_phase_changed(*phase),
        Event::PageSettled { index } => router.on_page_settled(*index),
        Event::TabTapped { index } => router.on_tab_tapped(*index),
        Event::EnterSearch => router.enter_search(),
        Event::ExitSearch => router.exit_search(),
        Event::QueryChanged { text } => router.on_query_changed(text),
        Event::SearchClosed { query } => router.on_search_close(query),
        Event::BackPressed { is_task_root } => router.on_back_pressed(*is_task_root),
        Event::ExternalRequest { request } => router.apply_external_request(request),
        Event::ListFilterChanged { filter } => router.apply_list_filter(filter),
        Event::Resume => router.on_resume(),
    };

    tracing::debug!(action_count = actions.len(), "event handled");
    actions
}

//! Menu affordances derived from navigation state.
//!
//! When the router asks the host to refresh affordances, the host recomputes
//! this view model and renders it. It holds no logic beyond the derivation
//! itself, so the menu never has to inspect navigation state directly.
//!
//! # Rules
//!
//! - In search mode the search item and call settings are hidden; the filter
//!   and add-contact items move into the overflow menu only on devices with a
//!   permanent menu key.
//! - On the primary page at rest, the page draws its own controls, so the
//!   search item is hidden and call settings only show behind a permanent menu
//!   key. While a transition is in flight the regular items are shown.
//! - The filter and add-contact items belong to the filter page.
//!
//! # Example
//!
//! ```rust
//! use dialnav::nav::{Affordances, NavigationState};
//! use dialnav::{PageIndex, PageLayout};
//!
//! let layout = PageLayout::dialer();
//! let state = NavigationState::new(PageIndex::new(2));
//! let menu = Affordances::compute(&state, &layout, false);
//! assert!(menu.search && menu.filter_option && menu.call_settings);
//! ```

use super::state::NavigationState;
use crate::domain::PageLayout;
use serde::Serialize;

/// Visibility of each menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Affordances {
    /// Search entry point.
    pub search: bool,
    /// Account filter chooser.
    pub filter_option: bool,
    /// Add-contact shortcut.
    pub add_contact: bool,
    /// Call settings entry.
    pub call_settings: bool,
    /// Placeholder keeping the overflow slot stable on permanent-key devices.
    pub overflow_placeholder: bool,
}

impl Affordances {
    /// Derives the menu from the current state.
    #[must_use]
    pub fn compute(state: &NavigationState, layout: &PageLayout, has_permanent_menu_key: bool) -> Self {
        if state.search_active() {
            return Self {
                search: false,
                filter_option: has_permanent_menu_key,
                add_contact: has_permanent_menu_key,
                call_settings: false,
                overflow_placeholder: false,
            };
        }

        let page = state.current_page();
        let on_filter_page = layout.filter_page() == Some(page);

        let (search, call_settings, overflow_placeholder) =
            if page.is_primary() && !state.phase().in_flight() {
                (false, has_permanent_menu_key, false)
            } else {
                (true, true, has_permanent_menu_key)
            };

        Self {
            search,
            filter_option: on_filter_page,
            add_contact: on_filter_page,
            call_settings,
            overflow_placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageIndex;
    use crate::nav::modes::{TransitionOrigin, TransitionPhase};

    #[test]
    fn primary_page_at_rest_hides_search() {
        let layout = PageLayout::dialer();
        let state = NavigationState::new(PageIndex::PRIMARY);

        let menu = Affordances::compute(&state, &layout, false);
        assert_eq!(menu, Affordances::default());

        let menu = Affordances::compute(&state, &layout, true);
        assert!(menu.call_settings);
        assert!(!menu.search);
    }

    #[test]
    fn primary_page_mid_transition_shows_regular_items() {
        let layout = PageLayout::dialer();
        let mut state = NavigationState::new(PageIndex::PRIMARY);
        state.begin(TransitionPhase::Dragging, TransitionOrigin::Drag);

        let menu = Affordances::compute(&state, &layout, true);
        assert!(menu.search && menu.call_settings && menu.overflow_placeholder);
        assert!(!menu.filter_option);
    }

    #[test]
    fn search_mode_hides_navigation_items() {
        let layout = PageLayout::dialer();
        let mut state = NavigationState::new(PageIndex::new(2));
        state.enter_search();

        let menu = Affordances::compute(&state, &layout, true);
        assert!(!menu.search && !menu.call_settings);
        assert!(menu.filter_option && menu.add_contact);

        let menu = Affordances::compute(&state, &layout, false);
        assert!(!menu.filter_option && !menu.add_contact);
    }
}

//! Recording host used by the integration tests.

#![allow(dead_code)]

use dialnav::nav::{
    BusyProbe, FilterAware, NavigationRouter, PageContent, RequestAware, SearchContentProvider,
    TransitionPhase, VisibilityAware,
};
use dialnav::{Action, NavigationRequest, PageLayout, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const DIALER: usize = 0;
pub const LOG: usize = 1;
pub const FAVORITES: usize = 2;

#[derive(Default)]
pub struct Recorded {
    pub visibility: Vec<(usize, bool)>,
    pub filters: Vec<(usize, String)>,
    pub requests: Vec<(usize, NavigationRequest)>,
    pub queries: Vec<(String, bool)>,
    pub search_filters: Vec<String>,
}

pub type Shared = Rc<RefCell<Recorded>>;

struct RecordingPage {
    index: usize,
    log: Shared,
}

impl VisibilityAware for RecordingPage {
    fn on_visibility_changed(&mut self, visible: bool) {
        self.log.borrow_mut().visibility.push((self.index, visible));
    }
}

impl FilterAware for RecordingPage {
    fn set_filter_text(&mut self, filter: &str) {
        self.log.borrow_mut().filters.push((self.index, filter.to_string()));
    }
}

impl RequestAware for RecordingPage {
    fn configure_from_request(&mut self, request: &NavigationRequest) {
        self.log.borrow_mut().requests.push((self.index, request.clone()));
    }
}

impl PageContent for RecordingPage {
    fn visibility(&mut self) -> Option<&mut dyn VisibilityAware> {
        Some(self)
    }

    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        (self.index == FAVORITES).then_some(self as &mut dyn FilterAware)
    }

    fn request_handler(&mut self) -> Option<&mut dyn RequestAware> {
        Some(self)
    }
}

struct RecordingSearch {
    log: Shared,
}

impl SearchContentProvider for RecordingSearch {
    fn set_query_string(&mut self, text: &str, immediate: bool) {
        self.log.borrow_mut().queries.push((text.to_string(), immediate));
    }

    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        Some(self)
    }
}

impl FilterAware for RecordingSearch {
    fn set_filter_text(&mut self, filter: &str) {
        self.log.borrow_mut().search_filters.push(filter.to_string());
    }
}

pub struct SwitchProbe {
    pub busy: Rc<Cell<bool>>,
    pub call_screen: Rc<Cell<bool>>,
}

impl BusyProbe for SwitchProbe {
    fn is_busy(&self) -> Result<bool> {
        Ok(self.busy.get())
    }

    fn show_call_screen(&mut self) -> Result<bool> {
        Ok(self.call_screen.get())
    }
}

/// A router on the dialer layout with recording collaborators.
pub struct Host {
    pub router: NavigationRouter,
    pub log: Shared,
    pub busy: Rc<Cell<bool>>,
    pub call_screen: Rc<Cell<bool>>,
}

impl Host {
    pub fn new(restored: Option<i64>) -> Self {
        Self::with_search(restored, true)
    }

    pub fn with_search(restored: Option<i64>, search: bool) -> Self {
        let log = Shared::default();
        let busy = Rc::new(Cell::new(false));
        let call_screen = Rc::new(Cell::new(false));

        let mut router = NavigationRouter::new(PageLayout::dialer(), restored).with_busy_probe(Box::new(
            SwitchProbe {
                busy: Rc::clone(&busy),
                call_screen: Rc::clone(&call_screen),
            },
        ));
        for index in [DIALER, LOG, FAVORITES] {
            router.attach_page(index, Box::new(RecordingPage { index, log: Rc::clone(&log) }));
        }
        if search {
            router.attach_search_provider(Box::new(RecordingSearch { log: Rc::clone(&log) }));
        }

        let host = Self {
            router,
            log,
            busy,
            call_screen,
        };
        host.clear();
        host
    }

    pub fn clear(&self) {
        *self.log.borrow_mut() = Recorded::default();
    }

    pub fn visibility(&self) -> Vec<(usize, bool)> {
        self.log.borrow().visibility.clone()
    }

    pub fn current(&self) -> usize {
        self.router.state().current_page().get()
    }

    pub fn manual(&self) -> usize {
        self.router.state().last_manual_selection().get()
    }

    /// Taps a tab and lets the pager animate to wherever it was sent.
    pub fn tap(&mut self, index: usize) -> Vec<Action> {
        let mut actions = self.router.on_tab_tapped(index);
        let target = actions.iter().find_map(|action| match action {
            Action::ScrollTo { page, animate: true } => Some(page.get()),
            _ => None,
        });
        if let Some(target) = target {
            actions.extend(self.router.on_scroll_phase_changed(TransitionPhase::Settling));
            actions.extend(self.router.on_page_settled(target));
            actions.extend(self.router.on_scroll_phase_changed(TransitionPhase::Idle));
        }
        actions
    }

    /// A full swipe: drag, then settle on each of `settles`, then idle.
    pub fn swipe(&mut self, settles: &[usize]) -> Vec<Action> {
        let mut actions = self.router.on_scroll_phase_changed(TransitionPhase::Dragging);
        for &index in settles {
            actions.extend(self.router.on_page_settled(index));
            actions.extend(self.router.on_scroll_phase_changed(TransitionPhase::Settling));
        }
        actions.extend(self.router.on_scroll_phase_changed(TransitionPhase::Idle));
        actions
    }
}

/// Pages currently believed visible, replaying the log from `initial`.
pub fn visible_after(initial: Option<usize>, log: &[(usize, bool)]) -> Vec<usize> {
    let mut visible: Vec<usize> = initial.into_iter().collect();
    for &(page, shown) in log {
        if shown {
            visible.push(page);
        } else {
            visible.retain(|&p| p != page);
        }
    }
    visible
}

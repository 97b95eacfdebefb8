//! Capability traits for the collaborators a surface coordinates, and the
//! registry that delivers visibility to them.
//!
//! Page content is opaque to this crate. A page is a [`PageContent`] that may
//! expose optional capabilities; each capability is a small trait reached
//! through an accessor returning `Option`, so a page lacking a capability
//! simply receives no call.
//!
//! ```rust
//! use dialnav::nav::{PageContent, VisibilityAware};
//!
//! #[derive(Default)]
//! struct CallLog {
//!     visible: bool,
//! }
//!
//! impl VisibilityAware for CallLog {
//!     fn on_visibility_changed(&mut self, visible: bool) {
//!         self.visible = visible;
//!     }
//! }
//!
//! impl PageContent for CallLog {
//!     fn visibility(&mut self) -> Option<&mut dyn VisibilityAware> {
//!         Some(self)
//!     }
//! }
//! ```

use crate::domain::{NavigationRequest, PageIndex, Result};
use std::fmt;

/// Receives visibility changes while the page sits in the pager.
pub trait VisibilityAware {
    /// Called with `true` when the page becomes the user-visible one and with
    /// `false` when it stops being so.
    fn on_visibility_changed(&mut self, visible: bool);
}

/// Accepts a list filter (for example the selected accounts).
pub trait FilterAware {
    /// Applies `filter` to the listed content.
    fn set_filter_text(&mut self, filter: &str);
}

/// Reacts to an external request once it has been applied.
pub trait RequestAware {
    /// Configures the page from the request that brought it to front.
    fn configure_from_request(&mut self, request: &NavigationRequest);
}

/// One slot of the fixed page set.
///
/// Every capability is optional and defaults to absent.
pub trait PageContent {
    /// Visibility capability.
    fn visibility(&mut self) -> Option<&mut dyn VisibilityAware> {
        None
    }

    /// List filter capability.
    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        None
    }

    /// External request capability.
    fn request_handler(&mut self) -> Option<&mut dyn RequestAware> {
        None
    }
}

/// Content shown by the search overlay.
pub trait SearchContentProvider {
    /// Pushes the current query. Empty text shows the unfiltered list.
    fn set_query_string(&mut self, text: &str, immediate: bool);

    /// List filter capability.
    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        None
    }
}

/// Source of the external busy signal (an active call).
pub trait BusyProbe {
    /// Whether the surface is busy.
    ///
    /// # Errors
    ///
    /// Returns [`DialnavError::BusyProbe`](crate::DialnavError::BusyProbe)
    /// when the signal cannot be read; callers treat that as not busy.
    fn is_busy(&self) -> Result<bool>;

    /// Asks the busy context to bring its own screen to front.
    ///
    /// Returns `Ok(true)` if it did, in which case the surface should close.
    ///
    /// # Errors
    ///
    /// Returns an error when the busy context cannot be reached; callers
    /// treat that as "did not redirect".
    fn show_call_screen(&mut self) -> Result<bool> {
        Ok(false)
    }
}

impl<F> BusyProbe for F
where
    F: Fn() -> Result<bool>,
{
    fn is_busy(&self) -> Result<bool> {
        self()
    }
}

/// A probe that never reports busy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverBusy;

impl BusyProbe for NeverBusy {
    fn is_busy(&self) -> Result<bool> {
        Ok(false)
    }
}

/// Attached page content plus which page currently holds visibility.
///
/// Visibility is tracked logically even for slots with nothing attached, so
/// late attachment can catch a page up.
pub struct PageRegistry {
    slots: Vec<Option<Box<dyn PageContent>>>,
    visible: Option<PageIndex>,
}

impl PageRegistry {
    /// Creates an empty registry for `count` pages.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(count).collect(),
            visible: None,
        }
    }

    /// Attaches content to a slot, returning what was there before.
    ///
    /// Content attached to the page that currently holds visibility is told
    /// so right away.
    ///
    /// # Errors
    ///
    /// Hands `content` back untouched when `page` is outside the registry.
    pub fn attach(
        &mut self,
        page: PageIndex,
        content: Box<dyn PageContent>,
    ) -> std::result::Result<Option<Box<dyn PageContent>>, Box<dyn PageContent>> {
        let Some(slot) = self.slots.get_mut(page.get()) else {
            tracing::warn!(page = %page, slots = self.slots.len(), "attach outside registry, rejecting");
            return Err(content);
        };
        let previous = slot.replace(content);

        tracing::debug!(page = %page, replaced = previous.is_some(), "page attached");

        if self.visible == Some(page) {
            self.notify(page, true);
        }
        Ok(previous)
    }

    /// Whether content is attached to `page`.
    #[must_use]
    pub fn is_attached(&self, page: PageIndex) -> bool {
        self.slots.get(page.get()).is_some_and(Option::is_some)
    }

    /// The page that last received `visible = true`, if still visible.
    #[must_use]
    pub const fn visible_page(&self) -> Option<PageIndex> {
        self.visible
    }

    /// Makes `page` the visible one.
    ///
    /// The previously visible page hears `false` before `page` hears `true`.
    /// Returns false, and sends nothing, when `page` is already visible.
    pub fn show(&mut self, page: PageIndex) -> bool {
        if self.visible == Some(page) {
            return false;
        }
        if let Some(old) = self.visible.take() {
            self.notify(old, false);
        }
        self.notify(page, true);
        self.visible = Some(page);
        true
    }

    /// Takes visibility away from whichever page holds it.
    pub fn hide(&mut self) -> Option<PageIndex> {
        let old = self.visible.take()?;
        self.notify(old, false);
        Some(old)
    }

    /// Pushes a list filter to every page able to take it.
    ///
    /// Returns how many pages accepted it.
    pub fn apply_filter(&mut self, filter: &str) -> usize {
        let mut accepted = 0;
        for target in self.slots.iter_mut().flatten().filter_map(|content| content.list_filter()) {
            target.set_filter_text(filter);
            accepted += 1;
        }
        accepted
    }

    /// Hands an applied request to the page it landed on.
    pub fn deliver(&mut self, page: PageIndex, request: &NavigationRequest) -> bool {
        let Some(handler) = self
            .slots
            .get_mut(page.get())
            .and_then(Option::as_mut)
            .and_then(|content| content.request_handler())
        else {
            return false;
        };
        handler.configure_from_request(request);
        true
    }

    fn notify(&mut self, page: PageIndex, visible: bool) {
        let listener = self
            .slots
            .get_mut(page.get())
            .and_then(Option::as_mut)
            .and_then(|content| content.visibility());

        match listener {
            Some(listener) => {
                tracing::debug!(page = %page, visible, "visibility changed");
                listener.on_visibility_changed(visible);
            }
            None => tracing::trace!(page = %page, visible, "page has no visibility capability"),
        }
    }
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attached: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("PageRegistry")
            .field("attached", &attached)
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(usize, bool)>>>;

    struct Recorder {
        index: usize,
        log: Log,
    }

    impl VisibilityAware for Recorder {
        fn on_visibility_changed(&mut self, visible: bool) {
            self.log.borrow_mut().push((self.index, visible));
        }
    }

    impl PageContent for Recorder {
        fn visibility(&mut self) -> Option<&mut dyn VisibilityAware> {
            Some(self)
        }
    }

    struct Blind;

    impl PageContent for Blind {}

    fn registry(log: &Log) -> PageRegistry {
        let mut registry = PageRegistry::new(3);
        for index in 0..2 {
            let attached = registry.attach(
                PageIndex::new(index),
                Box::new(Recorder { index, log: Rc::clone(log) }),
            );
            assert!(matches!(attached, Ok(None)));
        }
        assert!(registry.attach(PageIndex::new(2), Box::new(Blind)).is_ok());
        registry
    }

    #[test]
    fn show_sends_old_false_before_new_true() {
        let log = Log::default();
        let mut registry = registry(&log);

        assert!(registry.show(PageIndex::new(0)));
        assert!(registry.show(PageIndex::new(1)));
        assert!(!registry.show(PageIndex::new(1)));

        assert_eq!(*log.borrow(), vec![(0, true), (0, false), (1, true)]);
    }

    #[test]
    fn pages_without_capability_receive_nothing() {
        let log = Log::default();
        let mut registry = registry(&log);

        registry.show(PageIndex::new(2));
        registry.show(PageIndex::new(0));

        assert_eq!(*log.borrow(), vec![(0, true)]);
        assert_eq!(registry.visible_page(), Some(PageIndex::new(0)));
    }

    #[test]
    fn late_attach_catches_up_visible_page() {
        let log = Log::default();
        let mut registry = PageRegistry::new(2);
        registry.show(PageIndex::new(1));
        assert!(log.borrow().is_empty());

        assert!(registry.attach(PageIndex::new(1), Box::new(Recorder { index: 1, log: Rc::clone(&log) })).is_ok());
        assert!(registry.attach(PageIndex::new(0), Box::new(Recorder { index: 0, log: Rc::clone(&log) })).is_ok());

        assert_eq!(*log.borrow(), vec![(1, true)]);
    }

    #[test]
    fn hide_clears_visibility() {
        let log = Log::default();
        let mut registry = registry(&log);
        registry.show(PageIndex::new(1));

        assert_eq!(registry.hide(), Some(PageIndex::new(1)));
        assert_eq!(registry.hide(), None);
        assert_eq!(*log.borrow(), vec![(1, true), (1, false)]);
    }

    #[test]
    fn attach_outside_layout_is_rejected() {
        let mut registry = PageRegistry::new(1);
        assert!(registry.attach(PageIndex::new(4), Box::new(Blind)).is_err());
        assert!(!registry.is_attached(PageIndex::new(4)));
    }

    #[test]
    fn reattach_returns_previous_content() {
        let mut registry = PageRegistry::new(1);
        assert!(matches!(registry.attach(PageIndex::PRIMARY, Box::new(Blind)), Ok(None)));
        assert!(matches!(registry.attach(PageIndex::PRIMARY, Box::new(Blind)), Ok(Some(_))));
    }
}

//! Page model: indices into the fixed page set and the roles reserved in it.
//!
//! A navigation surface hosts a fixed, ordered set of pages (for a dialer:
//! dialpad, call log, favorites). Every index handed around the crate is a
//! [`PageIndex`] that has been validated against a [`PageLayout`], so the
//! components never have to re-check bounds.

use super::error::{DialnavError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a page within a [`PageLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(usize);

impl PageIndex {
    /// The primary page, always the first slot.
    pub const PRIMARY: Self = Self(0);

    /// Wraps a raw index without validation.
    ///
    /// Use [`PageLayout::page`] when the value comes from outside the crate.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether this is the first page of the set.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed page set and the pages reserved for specific contexts.
///
/// # Examples
///
/// ```
/// use dialnav::PageLayout;
///
/// let layout = PageLayout::dialer();
/// assert_eq!(layout.len(), 3);
/// assert_eq!(layout.name(layout.history_page()), Some("call_log"));
/// assert_eq!(layout.clamp(7), layout.default_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    names: Vec<String>,
    default_page: PageIndex,
    busy_page: PageIndex,
    history_page: PageIndex,
    filter_page: Option<PageIndex>,
}

impl PageLayout {
    /// Builds a layout from page names and role indices.
    ///
    /// # Errors
    ///
    /// Returns [`DialnavError::Config`] if `names` is empty and
    /// [`DialnavError::InvalidPage`] if any role points outside the set.
    pub fn new(
        names: Vec<String>,
        default_page: usize,
        busy_page: usize,
        history_page: usize,
        filter_page: Option<usize>,
    ) -> Result<Self> {
        if names.is_empty() {
            return Err(DialnavError::Config("layout needs at least one page".to_string()));
        }

        let count = names.len();
        let check = |index: usize| -> Result<PageIndex> {
            if index < count {
                Ok(PageIndex(index))
            } else {
                Err(DialnavError::InvalidPage {
                    index: i64::try_from(index).unwrap_or(i64::MAX),
                    count,
                })
            }
        };

        Ok(Self {
            default_page: check(default_page)?,
            busy_page: check(busy_page)?,
            history_page: check(history_page)?,
            filter_page: filter_page.map(check).transpose()?,
            names,
        })
    }

    /// The classic three page dialer: dialpad, call log, favorites.
    ///
    /// The dialpad is both the default and the page shown during a call.
    #[must_use]
    pub fn dialer() -> Self {
        Self {
            names: vec!["dialer".to_string(), "call_log".to_string(), "favorites".to_string()],
            default_page: PageIndex(0),
            busy_page: PageIndex(0),
            history_page: PageIndex(1),
            filter_page: Some(PageIndex(2)),
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; a layout holds at least one page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Validates a raw index.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<PageIndex> {
        (index < self.names.len()).then_some(PageIndex(index))
    }

    /// Validates a persisted value, falling back to the default page.
    ///
    /// Negative and too-large values are clamped rather than rejected.
    #[must_use]
    pub fn clamp(&self, stored: i64) -> PageIndex {
        usize::try_from(stored)
            .ok()
            .and_then(|index| self.page(index))
            .unwrap_or(self.default_page)
    }

    /// Iterates over all pages in order.
    pub fn pages(&self) -> impl Iterator<Item = PageIndex> {
        (0..self.names.len()).map(PageIndex)
    }

    /// Display name of a page.
    #[must_use]
    pub fn name(&self, page: PageIndex) -> Option<&str> {
        self.names.get(page.0).map(String::as_str)
    }

    /// Page used when nothing else applies and nothing was persisted.
    #[must_use]
    pub const fn default_page(&self) -> PageIndex {
        self.default_page
    }

    /// Page shown while the surface is busy (an active call).
    #[must_use]
    pub const fn busy_page(&self) -> PageIndex {
        self.busy_page
    }

    /// Page holding history / recent activity.
    #[must_use]
    pub const fn history_page(&self) -> PageIndex {
        self.history_page
    }

    /// Page that offers list filter affordances, if any.
    #[must_use]
    pub const fn filter_page(&self) -> Option<PageIndex> {
        self.filter_page
    }

    /// The page next to the primary one, target of the speculative swipe flip.
    #[must_use]
    pub fn secondary_page(&self) -> Option<PageIndex> {
        self.page(1)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::dialer()
    }
}

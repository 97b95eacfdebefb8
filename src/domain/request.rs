//! Externally delivered navigation requests.
//!
//! A request is what the hosting surface receives from outside: a deep link,
//! a resumed session, the hardware call key. The router resolves it to a page;
//! the shape of the request only matters for that resolution and for the
//! one-shot filter text it may carry.

use super::page::PageIndex;
use serde::{Deserialize, Serialize};

/// A navigation request delivered to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// Open the dialpad, optionally pre-filled (`tel:` links, dial actions).
    Dial {
        /// Number to pre-fill.
        #[serde(default)]
        number: Option<String>,
    },

    /// Open a specific page by index.
    OpenPage {
        /// Requested page; out-of-range values fall through to the default rules.
        page: usize,
    },

    /// Show recent activity (the call log).
    RecentActivity {
        /// Set when the request came from the hardware call key.
        #[serde(default)]
        call_key: bool,
    },

    /// Filter the contact lists with the given text.
    FilterContacts {
        /// Text to filter with; empty text is not stored.
        #[serde(default)]
        filter_text: Option<String>,
        /// Set when the request was relaunched from the recent-apps history.
        #[serde(default)]
        from_history: bool,
    },

    /// A generic launch or resume with no particular destination.
    Resume,
}

impl NavigationRequest {
    /// The page this request names outright, if it is a page-specific deep link.
    ///
    /// Page-specific deep links are the only requests honoured while busy.
    #[must_use]
    pub fn explicit_target(&self, dialer: PageIndex, page_count: usize) -> Option<PageIndex> {
        match self {
            Self::Dial { .. } => Some(dialer),
            Self::OpenPage { page } if *page < page_count => Some(PageIndex::new(*page)),
            _ => None,
        }
    }

    /// Whether the request asks for recent activity.
    #[must_use]
    pub const fn is_recent_activity(&self) -> bool {
        matches!(self, Self::RecentActivity { .. })
    }

    /// Filter text to stash for the targeted page.
    ///
    /// Requests relaunched from history never re-apply their filter.
    #[must_use]
    pub fn filter_text(&self) -> Option<&str> {
        match self {
            Self::FilterContacts {
                filter_text: Some(text),
                from_history: false,
            } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_ignores_out_of_range_pages() {
        let dialer = PageIndex::PRIMARY;
        assert_eq!(NavigationRequest::OpenPage { page: 2 }.explicit_target(dialer, 3), Some(PageIndex::new(2)));
        assert_eq!(NavigationRequest::OpenPage { page: 3 }.explicit_target(dialer, 3), None);
        assert_eq!(NavigationRequest::Dial { number: None }.explicit_target(dialer, 3), Some(dialer));
        assert_eq!(NavigationRequest::Resume.explicit_target(dialer, 3), None);
    }

    #[test]
    fn filter_text_skips_history_relaunch_and_empty_text() {
        let fresh = NavigationRequest::FilterContacts {
            filter_text: Some("ann".to_string()),
            from_history: false,
        };
        let relaunched = NavigationRequest::FilterContacts {
            filter_text: Some("ann".to_string()),
            from_history: true,
        };
        let empty = NavigationRequest::FilterContacts {
            filter_text: Some(String::new()),
            from_history: false,
        };
        assert_eq!(fresh.filter_text(), Some("ann"));
        assert_eq!(relaunched.filter_text(), None);
        assert_eq!(empty.filter_text(), None);
    }

    #[test]
    fn requests_deserialize_from_tagged_json() {
        let request: NavigationRequest =
            serde_json::from_str(r#"{"kind":"recent_activity","call_key":true}"#).unwrap();
        assert_eq!(request, NavigationRequest::RecentActivity { call_key: true });

        let request: NavigationRequest = serde_json::from_str(r#"{"kind":"resume"}"#).unwrap();
        assert_eq!(request, NavigationRequest::Resume);
    }
}

//! Dialnav: navigation and visibility coordination for a paged, tabbed
//! dialer surface with an overlay search mode.
//!
//! The surface hosts a fixed set of pages in a horizontally swipeable pager,
//! a tab strip mirroring the pager, and a search overlay that temporarily
//! replaces both. Swipes, tab taps, search entry and exit, and externally
//! delivered navigation requests all mutate one piece of navigation state.
//! This crate keeps that state consistent and tells every page exactly once
//! when it becomes, or stops being, the user-visible page.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Replay driver (main.rs)                            │  ← NDJSON events in,
//! └─────────────────────────────────────────────────────┘     actions out
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Navigation layer (nav/)                            │
//! │  - NavigationRouter: owns state, resolves requests  │
//! │  - PagerTransitionTracker: phase machine, commits   │
//! │  - TabSynchronizer: tab strip ⇄ pager               │
//! │  - SearchModeController: overlay entry / exit       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Domain        │   │ Storage       │   │ Observability │
//! │ (domain/)     │   │ (storage/)    │   │ (observability│
//! │ - Pages       │   │ - Selection   │   │  /)           │
//! │ - Requests    │   │   persistence │   │ - OTLP file   │
//! │ - Errors      │   │               │   │   export      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! The host feeds callbacks into the router (directly or as [`Event`]s via
//! [`handle_event`]) and executes the [`Action`]s it gets back. Visibility is
//! the exception: it is delivered straight to the page collaborators.
//!
//! # Configuration
//!
//! ```toml
//! page_names = ["dialer", "call_log", "favorites"]
//! default_page = 0
//! busy_page = 0
//! history_page = 1
//! filter_page = 2
//! has_permanent_menu_key = false
//! state_file = "~/.local/share/dialnav/selection.json"
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dialnav::storage::MemorySelectionStore;
//! use dialnav::{handle_event, initialize, Action, Config, Event, PageIndex};
//!
//! let store = MemorySelectionStore::with_selection(2);
//! let mut router = initialize(&Config::default(), &store)?;
//! assert_eq!(router.state().current_page(), PageIndex::new(2));
//!
//! let actions = handle_event(&mut router, &Event::TabTapped { index: 1 });
//! assert!(actions.contains(&Action::ScrollTo { page: PageIndex::new(1), animate: true }));
//! # Ok::<(), dialnav::DialnavError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod domain;
pub mod infrastructure;
pub mod nav;
pub mod observability;
pub mod storage;

pub use domain::{DialnavError, NavigationRequest, PageIndex, PageLayout, Result};
pub use nav::{handle_event, Action, Affordances, Event, NavigationRouter, NavigationState};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::SelectionStore;

/// Surface configuration.
///
/// Every field has a default, so an empty TOML document or an empty map
/// yields the classic three page dialer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page names in pager order. Default: `dialer`, `call_log`, `favorites`.
    pub page_names: Vec<String>,

    /// Page shown when nothing was persisted. Default: 0
    pub default_page: usize,

    /// Page shown while a call is active. Default: 0
    ///
    /// The default is the dialpad, the same page as `default_page`, so a
    /// relaunch during a call lands where the in-call controls live. Point
    /// it at a dedicated page to keep the busy page distinct from the
    /// default one.
    pub busy_page: usize,

    /// Page shown for recent-activity requests. Default: 1
    pub history_page: usize,

    /// Page offering the account filter and add-contact items. Default: 2
    pub filter_page: Option<usize>,

    /// Whether the device has a hardware menu key.
    pub has_permanent_menu_key: bool,

    /// Where the manual selection is persisted (`~` expanded).
    ///
    /// Default: `selection.json` in the data directory.
    pub state_file: Option<String>,

    /// Filter directive for tracing, e.g. `debug` or `dialnav=trace`.
    ///
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_names: default_page_names(),
            default_page: 0,
            busy_page: 0,
            history_page: 1,
            filter_page: Some(2),
            has_permanent_menu_key: false,
            state_file: None,
            trace_level: None,
        }
    }
}

fn default_page_names() -> Vec<String> {
    vec!["dialer".to_string(), "call_log".to_string(), "favorites".to_string()]
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Lists are comma separated. Values that fail to parse fall back to
    /// their defaults; `filter_page = "none"` disables the filter page.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dialnav::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_names".to_string(), "keypad, history".to_string());
    /// map.insert("history_page".to_string(), "1".to_string());
    /// map.insert("filter_page".to_string(), "none".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_names, vec!["keypad", "history"]);
    /// assert_eq!(config.filter_page, None);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let page_names = map
            .get("page_names")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty())
            .unwrap_or(defaults.page_names);

        let index = |key: &str, fallback: usize| {
            map.get(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(fallback)
        };

        let filter_page = match map.get("filter_page").map(|s| s.trim()) {
            None => defaults.filter_page,
            Some("none" | "") => None,
            Some(s) => s.parse::<usize>().ok().or(defaults.filter_page),
        };

        let has_permanent_menu_key = map
            .get("has_permanent_menu_key")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.has_permanent_menu_key);

        Self {
            page_names,
            default_page: index("default_page", defaults.default_page),
            busy_page: index("busy_page", defaults.busy_page),
            history_page: index("history_page", defaults.history_page),
            filter_page,
            has_permanent_menu_key,
            state_file: map.get("state_file").cloned(),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DialnavError::Config`] for malformed TOML or mistyped fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DialnavError::Config(format!("invalid configuration: {e}")))
    }

    /// Builds the page layout.
    ///
    /// Role indices outside the page set fall back to the default page (or
    /// page 0 if the default page itself is out of range) with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DialnavError::Config`] when no pages are configured.
    pub fn layout(&self) -> Result<PageLayout> {
        let count = self.page_names.len();
        let in_range = |index: usize| index < count;

        let default_page = if in_range(self.default_page) {
            self.default_page
        } else {
            tracing::warn!(index = self.default_page, count, "default page out of range, using 0");
            0
        };

        let role = |name: &str, index: usize| {
            if in_range(index) {
                index
            } else {
                tracing::warn!(role = name, index, count, "role page out of range, using default page");
                default_page
            }
        };

        let filter_page = self.filter_page.and_then(|index| {
            if in_range(index) {
                Some(index)
            } else {
                tracing::warn!(index, count, "filter page out of range, disabling");
                None
            }
        });

        PageLayout::new(
            self.page_names.clone(),
            default_page,
            role("busy", self.busy_page),
            role("history", self.history_page),
            filter_page,
        )
    }

    /// Resolved path of the persisted selection.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.state_file.as_deref().map_or_else(infrastructure::selection_file, |path| {
            PathBuf::from(infrastructure::expand_tilde(path))
        })
    }
}

/// Builds a router from configuration, restoring the persisted selection.
///
/// Tracing is not touched; call [`observability::init_tracing`] first if
/// spans should be exported.
///
/// # Errors
///
/// Returns [`DialnavError::Config`] if the configuration has no pages. A
/// store that cannot be read is not an error; the router starts on the
/// default page.
pub fn initialize(config: &Config, store: &dyn SelectionStore) -> Result<NavigationRouter> {
    tracing::debug!(pages = config.page_names.len(), "initializing navigation surface");
    let layout = config.layout()?;
    Ok(NavigationRouter::restore(layout, store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_the_default_dialer() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout().unwrap(), PageLayout::dialer());
    }

    #[test]
    fn toml_overrides_fields() {
        let config = Config::from_toml_str(
            r#"
            page_names = ["keypad", "recents", "contacts", "voicemail"]
            history_page = 3
            has_permanent_menu_key = true
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_names.len(), 4);
        assert!(config.has_permanent_menu_key);
        let layout = config.layout().unwrap();
        assert_eq!(layout.history_page(), PageIndex::new(3));
        assert_eq!(layout.filter_page(), Some(PageIndex::new(2)));
    }

    #[test]
    fn mistyped_toml_is_a_config_error() {
        let result = Config::from_toml_str("default_page = \"two\"");
        assert!(matches!(result, Err(DialnavError::Config(_))));
    }

    #[test]
    fn map_values_fall_back_on_parse_errors() {
        let mut map = BTreeMap::new();
        map.insert("history_page".to_string(), "lots".to_string());
        map.insert("has_permanent_menu_key".to_string(), "true".to_string());
        map.insert("page_names".to_string(), " , ".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.history_page, 1);
        assert!(config.has_permanent_menu_key);
        assert_eq!(config.page_names, default_page_names());
    }

    #[test]
    fn out_of_range_roles_are_clamped() {
        let config = Config {
            page_names: vec!["a".to_string(), "b".to_string()],
            default_page: 1,
            busy_page: 5,
            history_page: 9,
            filter_page: Some(2),
            ..Config::default()
        };

        let layout = config.layout().unwrap();
        assert_eq!(layout.default_page(), PageIndex::new(1));
        assert_eq!(layout.busy_page(), PageIndex::new(1));
        assert_eq!(layout.history_page(), PageIndex::new(1));
        assert_eq!(layout.filter_page(), None);
    }

    #[test]
    fn no_pages_is_a_config_error() {
        let config = Config {
            page_names: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(config.layout(), Err(DialnavError::Config(_))));
    }

    #[test]
    fn explicit_state_file_wins() {
        let config = Config {
            state_file: Some("/var/lib/dialnav/sel.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.state_path(), PathBuf::from("/var/lib/dialnav/sel.json"));
    }
}

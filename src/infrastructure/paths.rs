//! Data directory resolution and `~` expansion.
//!
//! The data directory follows the XDG base directory layout:
//! `$XDG_DATA_HOME/dialnav`, falling back to `$HOME/.local/share/dialnav`,
//! falling back to a relative `.dialnav` when neither is set.

use std::path::PathBuf;

const APP_DIR: &str = "dialnav";

/// Returns the data directory for persisted state and trace output.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var("XDG_DATA_HOME").ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

/// Default location of the persisted selection.
#[must_use]
pub fn selection_file() -> PathBuf {
    get_data_dir().join("selection.json")
}

fn data_dir_from(xdg_data_home: Option<&str>, home: Option<&str>) -> PathBuf {
    match (xdg_data_home.filter(|v| !v.is_empty()), home.filter(|v| !v.is_empty())) {
        (Some(xdg), _) => PathBuf::from(xdg).join(APP_DIR),
        (None, Some(home)) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        (None, None) => PathBuf::from(format!(".{APP_DIR}")),
    }
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use dialnav::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~/path"), "relative/~/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_with_home(path, std::env::var("HOME").ok().as_deref())
}

fn expand_with_home(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

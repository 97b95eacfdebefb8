//! Phase and origin types for page transitions.
//!
//! A page transition is described by two orthogonal values: the phase the
//! pager container reports ([`TransitionPhase`]) and why the transition was
//! started ([`TransitionOrigin`]). Together they replace the pair of loose
//! "during swipe" / "user tab click" flags a pager listener would otherwise
//! keep, and rule out the combinations those flags allowed (both set, or both
//! clear in the middle of a transition).
//!
//! ```text
//!  Idle ──(drag begins)──► Dragging ──(finger lifted)──► Settling ──► Idle
//!   │                                                       ▲
//!   └────────────────(tab tap / programmatic)───────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Scroll phase of the pager container.
///
/// `Idle` is both the initial and terminal phase of every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// No transition in flight.
    #[default]
    Idle,

    /// The user's finger is moving the pages.
    Dragging,

    /// Pages are animating towards their resting position.
    Settling,
}

impl TransitionPhase {
    /// Whether a transition is in flight.
    #[must_use]
    pub const fn in_flight(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Why the current transition was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOrigin {
    /// A swipe gesture on the pager.
    Drag,

    /// A tap on a tab in the tab strip.
    Tap,

    /// The router applying an external request.
    Programmatic,
}

impl TransitionOrigin {
    /// Whether the user picked the destination directly.
    ///
    /// Only user picks are candidates for the remembered manual selection.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        matches!(self, Self::Drag | Self::Tap)
    }
}

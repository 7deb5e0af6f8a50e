//! Enumeration state machine
//!
//! One enumeration call walks its nested handles through these states. Each
//! forward transition acquires a handle that carries its own teardown
//! obligation; the reverse transitions record that the obligation was met.

use serde::{Deserialize, Serialize};

/// States of a single enumeration call
///
/// State transitions:
/// ```text
/// Unopened → SessionOpen → SearchActive
///                 ↑              │
///                 └──────────────┘ (search ended)
/// SessionOpen → Done (session closed)
/// Any non-terminal state → Failed (on error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationState {
    /// No handle has been acquired yet
    #[default]
    Unopened,
    /// The root handler owns a parsed index; it must be closed
    SessionOpen,
    /// A search cursor is live; it must be ended before the session closes
    SearchActive,
    /// Every handle was released and the result was handed over
    Done,
    /// The call aborted; acquired handles are still released on unwind
    Failed,
}

impl EnumerationState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: EnumerationState) -> bool {
        use EnumerationState::*;
        matches!(
            (self, target),
            (Unopened, SessionOpen)
                | (SessionOpen, SearchActive)
                | (SearchActive, SessionOpen)
                | (SessionOpen, Done)
                | (Unopened, Failed)
                | (SessionOpen, Failed)
                | (SearchActive, Failed)
        )
    }

    /// Whether a handle acquired in this state still needs releasing
    pub fn holds_resources(&self) -> bool {
        matches!(
            self,
            EnumerationState::SessionOpen | EnumerationState::SearchActive
        )
    }

    /// Check if the call is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnumerationState::Done | EnumerationState::Failed)
    }
}

impl std::fmt::Display for EnumerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumerationState::Unopened => write!(f, "Unopened"),
            EnumerationState::SessionOpen => write!(f, "SessionOpen"),
            EnumerationState::SearchActive => write!(f, "SearchActive"),
            EnumerationState::Done => write!(f, "Done"),
            EnumerationState::Failed => write!(f, "Failed"),
        }
    }
}

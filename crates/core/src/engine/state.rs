//! Cycle state machine and generation tokens.

use serde::{Deserialize, Serialize};

/// Monotonically increasing token identifying one fetch/compute cycle.
///
/// A result is applied only if its token is still the latest issued;
/// otherwise the cycle is superseded and its result is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

/// State of the most recently issued cycle.
///
/// Transitions are driven by explicit events only:
/// `Idle -> Fetching -> Computing -> Ready | Failed`.
/// A superseded cycle leaves no trace here; its staleness is a per-cycle
/// outcome, not an engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleState {
    /// No cycle has been issued yet.
    Idle,
    /// The cycle is draining facts from the store.
    Fetching(Generation),
    /// Facts are in memory; balances and the pivot cube are being built.
    Computing(Generation),
    /// The cycle's result has been applied.
    Ready(Generation),
    /// The cycle failed to fetch; no partial result was applied.
    Failed(Generation),
}

impl CycleState {
    /// The token of the cycle this state belongs to, if any.
    #[must_use]
    pub const fn generation(&self) -> Option<Generation> {
        match self {
            Self::Idle => None,
            Self::Fetching(g) | Self::Computing(g) | Self::Ready(g) | Self::Failed(g) => Some(*g),
        }
    }

    /// Returns true when the cycle reached a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }
}

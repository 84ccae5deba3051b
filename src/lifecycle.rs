//! Follower lifecycle states and the transition table.
//!
//! ```text
//! Spawned ──► Traveling ──► Completing ──► Removed
//!    │            │
//!    ▼            └────────────────────────► Removed (path lost)
//! Invalid
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a follower is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Spawned without a usable path; never processes a frame.
    Invalid,
    /// Created, initial stride not yet set.
    Spawned,
    /// Following the path under stride commands.
    Traveling,
    /// Arrived at the final waypoint; the arrival effect fires next frame.
    Completing,
    /// Finished; the host may reclaim the follower.
    Removed,
}

impl LifecycleState {
    /// Whether the state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Invalid | Self::Removed)
    }

    /// The single source of truth for legal transitions.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Spawned, Self::Invalid | Self::Traveling)
                | (Self::Traveling, Self::Completing | Self::Removed)
                | (Self::Completing, Self::Removed)
        )
    }
}

/// Errors raised by [`Lifecycle::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The transition table forbids moving from `from` to `to`.
    #[error("illegal lifecycle transition {from:?} -> {to:?}")]
    IllegalTransition {
        /// State before the attempted transition.
        from: LifecycleState,
        /// Requested state.
        to: LifecycleState,
    },
}

/// Lifecycle state plus the follower's own frame counter.
///
/// The counter drives ambient effect periodicity, so every follower keeps
/// its own rhythm independent of other followers and of the host clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifecycle {
    state: LifecycleState,
    frames: u64,
}

impl Lifecycle {
    /// Starts a lifecycle for a path of `path_len` waypoints.
    ///
    /// An empty path lands in [`LifecycleState::Invalid`] immediately.
    #[must_use]
    pub const fn spawn(path_len: usize) -> Self {
        let state = if path_len == 0 {
            LifecycleState::Invalid
        } else {
            LifecycleState::Spawned
        };
        Self { state, frames: 0 }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Frames processed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns the counter value for the frame being processed and advances it.
    pub fn next_frame(&mut self) -> u64 {
        let frame = self.frames;
        self.frames = self.frames.saturating_add(1);
        frame
    }

    /// Moves to `to` if the transition table allows it.
    ///
    /// # Errors
    /// Returns [`LifecycleError`] and leaves the state unchanged when the
    /// transition is illegal.
    pub fn advance(&mut self, to: LifecycleState) -> Result<LifecycleState, LifecycleError> {
        if !self.state.can_transition(to) {
            return Err(LifecycleError::IllegalTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(to)
    }
}

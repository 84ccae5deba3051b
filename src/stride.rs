//! Stride bookkeeping and the stale-command filter.
//!
//! A stride is the span of the path between the last commanded waypoint and
//! the newly commanded one. The external scheduler issues commands at its own
//! cadence, so commands may arrive late or out of order; anything at or
//! behind the current start boundary is dropped.

use log::debug;

use crate::path::Path;

/// The span of the path the follower is currently allowed to traverse.
///
/// Invariants: `start <= target <= path.last_index()`, and `arc_length` is
/// the path's arc length from `start` to `target` when the stride was set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrideState {
    start: usize,
    target: usize,
    started_at: u64,
    arc_length: f64,
}

/// Result of offering a stride command to [`StrideState::advance_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrideOutcome {
    /// The command opened a new stride.
    Accepted {
        /// New start index (the previous target).
        start: usize,
        /// New target index.
        target: usize,
    },
    /// The command was at or behind the start boundary, or the path has a
    /// single waypoint, and was ignored.
    Stale,
}

impl StrideState {
    /// Zero-length stride parked on the first waypoint.
    #[must_use]
    pub const fn initial(now: u64) -> Self {
        Self {
            start: 0,
            target: 0,
            started_at: now,
            arc_length: 0.0,
        }
    }

    /// Index the current stride began at.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index the current stride ends at.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Frame-clock timestamp when the current stride began.
    #[must_use]
    pub const fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Cached arc length of the current stride.
    #[must_use]
    pub const fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Whether there is ground left to cover between `start` and `target`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.start < self.target
    }

    /// Marks the stride as fully traversed.
    pub fn consume(&mut self) {
        self.start = self.target;
    }

    /// Opens a new stride towards `segment`.
    ///
    /// Commands with `segment <= start` are stale and leave the state
    /// untouched, as is every command on a single-waypoint path. Otherwise
    /// the previous target becomes the new start, the target is clamped into
    /// the path, and the arc length is cached. Any progress inside the
    /// previous stride is abandoned; the new stride starts from the previous
    /// target waypoint.
    ///
    /// A command that lands behind the previous target cannot move the
    /// target backwards: the new stride is zero length and the follower waits
    /// at the previous target.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use trundle::path::Path;
    /// use trundle::stride::{StrideOutcome, StrideState};
    ///
    /// let path = Path::new(vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).unwrap();
    /// let mut stride = StrideState::initial(0);
    /// assert_eq!(
    ///     stride.advance_to(1, 5, &path),
    ///     StrideOutcome::Accepted { start: 0, target: 1 }
    /// );
    /// assert_eq!(stride.advance_to(0, 6, &path), StrideOutcome::Stale);
    /// ```
    pub fn advance_to(&mut self, segment: usize, now: u64, path: &Path) -> StrideOutcome {
        if path.last_index() == 0 {
            return StrideOutcome::Stale;
        }
        if segment <= self.start {
            debug!(
                "stale stride command to {segment} ignored (start {}, target {})",
                self.start, self.target
            );
            return StrideOutcome::Stale;
        }

        let start = self.target;
        let target = segment.min(path.last_index()).max(start);
        self.start = start;
        self.target = target;
        self.started_at = now;
        self.arc_length = path.arc_length(start, target);
        debug!(
            "stride {start} -> {target} opened at frame {now} covering {:.3}",
            self.arc_length
        );
        StrideOutcome::Accepted { start, target }
    }
}

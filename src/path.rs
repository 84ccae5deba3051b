//! Immutable waypoint sequences and arc-length queries.
//!
//! A [`Path`] is shared, never edited: replacing a follower's route means
//! building a new `Path`. Indices therefore stay stable for as long as a
//! follower holds on to one.

use std::sync::Arc;

use glam::{DVec3, IVec3};
use thiserror::Error;

use crate::constants::CELL_CENTRE_OFFSET;

/// Errors raised when constructing a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// No waypoints were supplied.
    #[error("a path needs at least one waypoint")]
    Empty,
}

/// Ordered, non-empty sequence of 3D waypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Arc<[DVec3]>,
}

impl Path {
    /// Builds a path from explicit waypoints.
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] when `waypoints` is empty.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use trundle::path::Path;
    ///
    /// let path = Path::new(vec![DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0)]).unwrap();
    /// assert_eq!(path.len(), 2);
    /// assert!((path.arc_length(0, 1) - 5.0).abs() < 1e-12);
    /// ```
    pub fn new(waypoints: Vec<DVec3>) -> Result<Self, PathError> {
        if waypoints.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self {
            waypoints: waypoints.into(),
        })
    }

    /// Builds a path through the centres of integer grid cells.
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] when `cells` is empty.
    pub fn from_cells(cells: &[IVec3]) -> Result<Self, PathError> {
        Self::new(cells.iter().map(|cell| cell_centre(*cell)).collect())
    }

    /// Returns a new path visiting the same waypoints in the opposite order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            waypoints: self.waypoints.iter().rev().copied().collect(),
        }
    }

    /// Number of waypoints; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Waypoint at `index`, if in range.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<DVec3> {
        self.waypoints.get(index).copied()
    }

    /// First waypoint.
    #[must_use]
    pub fn first(&self) -> DVec3 {
        self.waypoints.first().copied().unwrap_or(DVec3::ZERO)
    }

    /// The edge leaving waypoint `index`, as `(from, to)`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<(DVec3, DVec3)> {
        let from = self.waypoint(index)?;
        let to = self.waypoint(index.checked_add(1)?)?;
        Some((from, to))
    }

    /// All waypoints in order.
    #[must_use]
    pub fn waypoints(&self) -> &[DVec3] {
        &self.waypoints
    }

    /// Sum of consecutive waypoint distances from `from` to `to`.
    ///
    /// Returns `0.0` when `from >= to`. Indices beyond the final waypoint are
    /// clamped to it.
    #[must_use]
    pub fn arc_length(&self, from: usize, to: usize) -> f64 {
        let end = to.min(self.last_index());
        if from >= end {
            return 0.0;
        }
        self.waypoints
            .get(from..=end)
            .map_or(0.0, |span| {
                span.windows(2)
                    .map(|pair| match pair {
                        [a, b] => a.distance(*b),
                        _ => 0.0,
                    })
                    .sum()
            })
    }

    /// Arc length of the whole path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.arc_length(0, self.last_index())
    }
}

/// Centre of a grid cell in world coordinates.
#[must_use]
pub fn cell_centre(cell: IVec3) -> DVec3 {
    cell.as_dvec3() + DVec3::splat(CELL_CENTRE_OFFSET)
}

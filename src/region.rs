//! Coarse world regions a travelling follower asks its host to keep resident.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::numeric::floor_to_i32;

/// Planar grid cell of edge `region_size` containing a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionKey {
    /// Cell index along X.
    pub x: i32,
    /// Cell index along Z.
    pub z: i32,
}

impl RegionKey {
    /// Region containing `position` for regions of edge `region_size`.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use trundle::region::RegionKey;
    ///
    /// let key = RegionKey::containing(DVec3::new(-0.5, 70.0, 33.0), 16.0);
    /// assert_eq!(key, RegionKey { x: -1, z: 2 });
    /// ```
    #[must_use]
    pub fn containing(position: DVec3, region_size: f64) -> Self {
        Self {
            x: floor_to_i32(position.x / region_size),
            z: floor_to_i32(position.z / region_size),
        }
    }
}

/// Remembers the last region retained for one follower.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionTracker {
    current: Option<RegionKey>,
}

impl RegionTracker {
    /// Records the region at `position`.
    ///
    /// Returns `Some((previous, current))` when the follower entered a new
    /// region and the host should be told.
    pub fn observe(
        &mut self,
        position: DVec3,
        region_size: f64,
    ) -> Option<(Option<RegionKey>, RegionKey)> {
        let key = RegionKey::containing(position, region_size);
        if self.current == Some(key) {
            return None;
        }
        let previous = self.current.replace(key);
        Some((previous, key))
    }

    /// Forgets and returns the retained region.
    pub fn release(&mut self) -> Option<RegionKey> {
        self.current.take()
    }

    /// The region currently retained, if any.
    #[must_use]
    pub const fn current(&self) -> Option<RegionKey> {
        self.current
    }
}

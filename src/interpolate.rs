//! Per-frame arc-length interpolation along the current stride.
//!
//! Progress through a stride is a function of elapsed frames only, so the
//! follower lands in the same place for a given frame no matter how many
//! frames were actually delivered in between.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_EDGE_EPSILON;
use crate::numeric::frames_to_f64;
use crate::path::Path;
use crate::stride::StrideState;

/// Position and facing of a follower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position.
    pub position: DVec3,
    /// Unit direction of travel.
    pub direction: DVec3,
    /// Planar heading in radians, `atan2(direction.z, direction.x)`.
    pub heading: f64,
}

impl Pose {
    /// A pose at `position` facing +X.
    #[must_use]
    pub const fn at_rest(position: DVec3) -> Self {
        Self {
            position,
            direction: DVec3::X,
            heading: 0.0,
        }
    }

    /// A pose at `position` facing along the unit vector `direction`.
    #[must_use]
    pub fn facing(position: DVec3, direction: DVec3) -> Self {
        Self {
            position,
            direction,
            heading: heading_of(direction),
        }
    }
}

/// Planar heading of a direction vector (Y is up, X and Z are the ground).
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use trundle::interpolate::heading_of;
///
/// assert!((heading_of(DVec3::Z) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn heading_of(direction: DVec3) -> f64 {
    direction.z.atan2(direction.x)
}

/// What one frame of interpolation produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// No stride is open; the follower holds position.
    Waiting,
    /// The follower lies on an edge of the stride.
    OnEdge(Pose),
    /// The walk ran past every edge; the follower is clamped to the target
    /// waypoint and the stride should be consumed.
    Overrun(Pose),
}

/// Fraction of the stride elapsed at `now`, saturating at `1.0`.
#[must_use]
pub fn stride_fraction(started_at: u64, now: u64, period: u64) -> f64 {
    if period == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(started_at);
    (frames_to_f64(elapsed) / frames_to_f64(period)).clamp(0.0, 1.0)
}

/// Samples the follower's pose for frame `now`.
///
/// Walks the stride's edges, consuming each full edge length from the
/// distance travelled so far, and lands on the first edge that still has
/// distance to spare. Zero-length edges are stepped over. A stride with no
/// length at all overruns straight onto its target, keeping the `previous`
/// facing.
#[must_use]
pub fn sample(
    path: &Path,
    stride: &StrideState,
    now: u64,
    period: u64,
    previous: &Pose,
) -> Sample {
    if !stride.is_active() {
        return Sample::Waiting;
    }

    if stride.arc_length() <= DEGENERATE_EDGE_EPSILON {
        return overrun(path, stride, previous);
    }

    let fraction = stride_fraction(stride.started_at(), now, period);
    let mut remaining = fraction * stride.arc_length();

    for index in stride.start()..stride.target() {
        let Some((from, to)) = path.edge(index) else {
            break;
        };
        let length = from.distance(to);
        if length <= DEGENERATE_EDGE_EPSILON {
            continue;
        }
        if remaining <= length {
            let direction = (to - from) / length;
            return Sample::OnEdge(Pose::facing(
                from.lerp(to, remaining / length),
                direction,
            ));
        }
        remaining -= length;
    }

    overrun(path, stride, previous)
}

fn overrun(path: &Path, stride: &StrideState, previous: &Pose) -> Sample {
    let position = path
        .waypoint(stride.target())
        .unwrap_or(previous.position);
    Sample::Overrun(Pose {
        position,
        ..*previous
    })
}

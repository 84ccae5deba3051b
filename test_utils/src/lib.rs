//! Utility helpers for tests.

use approx::relative_eq;
use glam::DVec3;
use trundle::path::Path;

/// Ten-unit straight line along +X with a waypoint every two units.
///
/// # Panics
/// Never; the fixture is non-empty.
#[must_use]
pub fn straight_path() -> Path {
    Path::new((0..=5).map(|i| DVec3::new(f64::from(i) * 2.0, 0.0, 0.0)).collect())
        .unwrap_or_else(|e| panic!("straight fixture: {e}"))
}

/// Waypoints of the 3-4-5 elbow: edges of length 3 then 4.
#[must_use]
pub fn elbow_waypoints() -> Vec<DVec3> {
    vec![
        DVec3::ZERO,
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(3.0, 4.0, 0.0),
    ]
}

/// The 3-4-5 elbow as a [`Path`].
///
/// # Panics
/// Never; the fixture is non-empty.
#[must_use]
pub fn elbow_path() -> Path {
    Path::new(elbow_waypoints()).unwrap_or_else(|e| panic!("elbow fixture: {e}"))
}

/// Assert that two vectors agree component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors in the message when any component differs.
pub fn assert_vec_near(actual: DVec3, expected: DVec3, epsilon: f64) {
    let close = actual
        .to_array()
        .iter()
        .zip(expected.to_array())
        .all(|(a, e)| relative_eq!(*a, e, epsilon = epsilon));
    assert!(close, "expected {expected:?}, got {actual:?} (epsilon {epsilon})");
}

/// Assert that `point` lies on the segment from `from` to `to`.
///
/// # Panics
/// Panics when the point is off the segment by more than `epsilon`.
pub fn assert_on_segment(point: DVec3, from: DVec3, to: DVec3, epsilon: f64) {
    let detour = point.distance(from) + point.distance(to) - from.distance(to);
    assert!(
        detour.abs() <= epsilon,
        "{point:?} is {detour} off the segment {from:?} -> {to:?}"
    );
}

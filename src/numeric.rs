//! Numeric conversion helpers used across the project.
//!
//! The follower computes in `f64` and counts frames in `u64`; these helpers
//! guard the conversions at the boundaries to the `f32` render transform and
//! the `i32` region grid.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Convert a frame count into `f64` for fractional stride arithmetic.
///
/// Frame counts above 2^53 lose precision; at 60 frames per second that is
/// several million years of uptime.
#[expect(
    clippy::cast_precision_loss,
    reason = "Frame counts stay far below 2^53 in practice."
)]
#[must_use]
pub fn frames_to_f64(frames: u64) -> f64 {
    frames as f64
}

/// Floor the value and clamp it into the `i32` domain.
///
/// Non-finite input maps to zero.
///
/// # Examples
/// ```
/// use trundle::numeric::floor_to_i32;
/// assert_eq!(floor_to_i32(-0.5), -1);
/// assert_eq!(floor_to_i32(f64::INFINITY), 0);
/// assert_eq!(floor_to_i32(1e12), i32::MAX);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

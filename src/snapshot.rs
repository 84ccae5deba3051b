//! Read-only follower views and their presentation-side consumer.
//!
//! The authoritative follower publishes a [`FollowerSnapshot`] every frame.
//! A [`Replica`] consumes snapshots and blends between the two most recent
//! ones; it never runs the stride controller or the interpolation engine.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::lifecycle::LifecycleState;

/// Replicated view of one follower for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowerSnapshot<P> {
    /// Authoritative position.
    pub position: DVec3,
    /// Planar heading in radians.
    pub heading: f64,
    /// Distance per frame along the current stride; zero while waiting.
    pub velocity_hint: DVec3,
    /// Lifecycle state when the snapshot was taken.
    pub state: LifecycleState,
    /// Carried payload.
    pub payload: Option<P>,
}

/// Position and heading a replica renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplicaPose {
    /// Rendered position.
    pub position: DVec3,
    /// Rendered planar heading in radians.
    pub heading: f64,
}

/// Presentation-side mirror of a follower.
#[derive(Clone, Debug)]
pub struct Replica<P> {
    previous: Option<ReplicaPose>,
    current: Option<FollowerSnapshot<P>>,
}

impl<P> Default for Replica<P> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
        }
    }
}

impl<P> Replica<P> {
    /// An empty replica that has not yet seen a snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the next authoritative snapshot.
    ///
    /// The very first snapshot aligns the previous pose with it, so the
    /// first rendered frame does not glide in from the origin.
    pub fn apply(&mut self, snapshot: FollowerSnapshot<P>) {
        let latest = ReplicaPose {
            position: snapshot.position,
            heading: snapshot.heading,
        };
        self.previous = Some(
            self.current
                .as_ref()
                .map_or(latest, |current| ReplicaPose {
                    position: current.position,
                    heading: current.heading,
                }),
        );
        self.current = Some(snapshot);
    }

    /// Pose blended between the last two snapshots; `partial` is clamped
    /// to `[0, 1]`. `None` until a snapshot has arrived.
    #[must_use]
    pub fn pose_at(&self, partial: f64) -> Option<ReplicaPose> {
        let previous = self.previous?;
        let current = self.current.as_ref()?;
        let t = partial.clamp(0.0, 1.0);
        Some(ReplicaPose {
            position: previous.position.lerp(current.position, t),
            heading: previous.heading + shortest_turn(previous.heading, current.heading) * t,
        })
    }

    /// Position projected `frames` ahead of the latest snapshot using its
    /// velocity hint.
    #[must_use]
    pub fn extrapolate(&self, frames: f64) -> Option<DVec3> {
        self.current
            .as_ref()
            .map(|current| current.position + current.velocity_hint * frames)
    }

    /// Latest snapshot, if any.
    #[must_use]
    pub const fn latest(&self) -> Option<&FollowerSnapshot<P>> {
        self.current.as_ref()
    }

    /// Payload carried according to the latest snapshot.
    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.current.as_ref().and_then(|current| current.payload.as_ref())
    }
}

/// Signed angle from `from` to `to` in `(-PI, PI]`.
fn shortest_turn(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

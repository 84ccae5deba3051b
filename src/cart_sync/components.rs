//! ECS components and resources owned by the stride plugin.

use bevy::prelude::*;

use crate::follower::Follower;
use crate::interpolate::Pose;
use crate::numeric::expect_f32;

/// A ghost cart: an entity driven by a [`Follower`].
///
/// The payload is the entity of the item being carried, if any.
#[derive(Component, Debug)]
pub struct Cart {
    follower: Follower<Entity>,
}

impl Cart {
    /// Wraps a freshly spawned follower.
    #[must_use]
    pub const fn new(follower: Follower<Entity>) -> Self {
        Self { follower }
    }

    /// The follower driving this cart.
    #[must_use]
    pub const fn follower(&self) -> &Follower<Entity> {
        &self.follower
    }

    /// Mutable access for the plugin's systems.
    pub fn follower_mut(&mut self) -> &mut Follower<Entity> {
        &mut self.follower
    }
}

/// Host frame clock advanced once per `Update`.
///
/// Frame-clock timestamps handed to followers come from here; the follower
/// has no timer of its own.
#[derive(Resource, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Resource)]
pub struct FrameClock(u64);

impl FrameClock {
    /// Clock positioned at `frame`.
    #[must_use]
    pub const fn at(frame: u64) -> Self {
        Self(frame)
    }

    /// The current frame.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.0
    }

    /// Steps to the next frame.
    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// Render transform mirroring a follower pose.
///
/// Headings are measured from +X towards +Z, so the Y rotation is negated to
/// turn the model's +X axis onto the direction of travel.
#[must_use]
pub fn pose_transform(pose: &Pose) -> Transform {
    let position = pose.position;
    Transform::from_xyz(
        expect_f32(position.x),
        expect_f32(position.y),
        expect_f32(position.z),
    )
    .with_rotation(Quat::from_rotation_y(-expect_f32(pose.heading)))
}

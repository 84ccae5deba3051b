//! Per-frame systems and the spawn observer.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use crate::error::SpawnError;
use crate::follower::Follower;
use crate::lifecycle::LifecycleState;
use crate::settings::StrideSettings;

use super::components::{pose_transform, Cart, FrameClock};
use super::events::{
    CartEffect, CartRemoved, CartSpawned, SpawnCart, StrideSyncError, StrideSyncErrorContext,
};
use super::inbox::{StrideCommand, StrideInbox};

/// Steps the host frame clock.
pub fn advance_frame_clock_system(mut clock: ResMut<FrameClock>) {
    clock.advance();
}

/// Delivers queued stride commands to their carts.
///
/// Commands for carts that no longer exist are dropped.
pub fn apply_stride_commands_system(
    clock: Res<FrameClock>,
    mut inbox: ResMut<StrideInbox>,
    mut carts: Query<&mut Cart>,
) {
    let now = clock.now();
    for StrideCommand { cart, segment } in inbox.drain() {
        match carts.get_mut(cart) {
            Ok(mut target) => {
                let outcome = target.follower_mut().advance_to(segment, now);
                debug!("stride command {segment} for {cart:?}: {outcome:?}");
            }
            Err(_) => debug!("stride command for missing cart {cart:?} dropped"),
        }
    }
}

/// Runs one frame for every cart, mirrors its pose onto the `Transform` and
/// despawns carts that finished.
pub fn tick_carts_system(
    mut commands: Commands,
    clock: Res<FrameClock>,
    mut carts: Query<(Entity, &mut Cart, &mut Transform)>,
) {
    let now = clock.now();
    let mut requests = Vec::new();
    for (entity, mut cart, mut transform) in &mut carts {
        let state = cart.follower_mut().tick(now, &mut requests);
        let target = pose_transform(cart.follower().pose());
        transform.translation = target.translation;
        transform.rotation = target.rotation;

        for request in requests.drain(..) {
            commands.trigger(CartEffect {
                cart: entity,
                request,
            });
        }
        if state == LifecycleState::Removed {
            commands.trigger(CartRemoved {
                cart: entity,
                payload: cart.follower_mut().take_payload(),
            });
            commands.entity(entity).despawn();
        }
    }
}

/// Observer turning [`SpawnCart`] requests into cart entities.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub fn spawn_cart_observer(
    event: On<SpawnCart>,
    mut commands: Commands,
    clock: Res<FrameClock>,
    settings: Res<StrideSettings>,
    carts: Query<(), With<Cart>>,
) {
    let SpawnCart(request) = event.event();
    if let Some(capacity) = settings.capacity {
        if carts.iter().count() >= capacity {
            commands.trigger(StrideSyncError::new(
                StrideSyncErrorContext::Spawn,
                SpawnError::CapacityExhausted { capacity }.to_string(),
            ));
            return;
        }
    }
    match Follower::spawn(request.clone(), clock.now(), &settings) {
        Ok(follower) => {
            let transform = pose_transform(follower.pose());
            let cart = commands.spawn((Cart::new(follower), transform)).id();
            commands.trigger(CartSpawned { cart });
        }
        Err(err) => commands.trigger(StrideSyncError::new(
            StrideSyncErrorContext::Spawn,
            err.to_string(),
        )),
    }
}

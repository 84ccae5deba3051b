//! Observers recording what the stride plugin emits during tests.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use trundle::{CartEffect, CartRemoved, CartSpawned, EffectRequest, StrideSyncError};

/// Everything the plugin triggered since the last [`CartLog::clear`].
#[derive(Resource, Default, Debug)]
pub struct CartLog {
    /// Carts announced by `CartSpawned`.
    pub spawned: Vec<Entity>,
    /// Effect requests in trigger order.
    pub effects: Vec<(Entity, EffectRequest)>,
    /// Removal notifications with the payload handed back.
    pub removed: Vec<(Entity, Option<Entity>)>,
    /// Errors as `(context, detail)` strings.
    pub errors: Vec<(String, String)>,
}

impl CartLog {
    /// Forget everything recorded so far.
    #[allow(dead_code, reason = "Not every test binary clears the log.")]
    pub fn clear(&mut self) {
        self.spawned.clear();
        self.effects.clear();
        self.removed.clear();
        self.errors.clear();
    }

    /// Number of terminal effect requests recorded.
    #[allow(dead_code, reason = "Not every test binary counts terminals.")]
    pub fn terminal_count(&self) -> usize {
        self.effects
            .iter()
            .filter(|(_, request)| matches!(request, EffectRequest::Terminal(_)))
            .count()
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_spawned(event: On<CartSpawned>, mut log: ResMut<CartLog>) {
    log.spawned.push(event.event().cart);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_effect(event: On<CartEffect>, mut log: ResMut<CartLog>) {
    let CartEffect { cart, request } = *event.event();
    log.effects.push((cart, request));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_removed(event: On<CartRemoved>, mut log: ResMut<CartLog>) {
    let CartRemoved { cart, payload } = *event.event();
    log.removed.push((cart, payload));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<StrideSyncError>, mut log: ResMut<CartLog>) {
    let err = event.event();
    log.errors
        .push((format!("{:?}", err.context), err.detail.clone()));
}

/// Installs the capturing observers and their resource on `app`.
pub fn install_cart_log(app: &mut App) {
    app.insert_resource(CartLog::default());
    let world = app.world_mut();
    world.add_observer(record_spawned);
    world.add_observer(record_effect);
    world.add_observer(record_removed);
    world.add_observer(record_error);
}

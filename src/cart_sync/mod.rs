//! Bevy integration for ghost carts.
//!
//! This module re-exports the plugin, the cart component, the command inbox
//! and the events that connect followers to an ECS world.

mod components;
mod events;
mod inbox;
mod plugin;
mod systems;

pub use components::{pose_transform, Cart, FrameClock};
pub use events::{
    CartEffect, CartRemoved, CartSpawned, SpawnCart, StrideSyncError, StrideSyncErrorContext,
};
pub use inbox::{StrideCommand, StrideInbox};
pub use plugin::StridePlugin;
pub use systems::{
    advance_frame_clock_system, apply_stride_commands_system, spawn_cart_observer,
    tick_carts_system,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follower::SpawnRequest;
    use crate::settings::StrideSettings;
    use bevy::prelude::*;
    use glam::DVec3;

    fn app_with_period(period: u64) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StridePlugin::with_settings(StrideSettings {
            macro_tick_period: period,
            ..StrideSettings::default()
        }));
        app
    }

    fn only_cart(app: &mut App) -> Option<Entity> {
        let mut query = app.world_mut().query_filtered::<Entity, With<Cart>>();
        query.iter(app.world()).next()
    }

    #[test]
    fn spawned_cart_moves_and_despawns() {
        let mut app = app_with_period(4);
        app.world_mut().trigger(SpawnCart(SpawnRequest::new(vec![
            DVec3::ZERO,
            DVec3::new(8.0, 0.0, 0.0),
        ])));
        app.world_mut().flush();
        let cart = only_cart(&mut app).expect("cart spawned");

        app.world_mut()
            .resource_mut::<StrideInbox>()
            .push(StrideCommand { cart, segment: 1 });
        app.update();
        app.update();
        let x = app
            .world()
            .get::<Transform>(cart)
            .map_or(f32::NAN, |transform| transform.translation.x);
        assert!((x - 2.0).abs() < 1e-5, "expected x = 2, got {x}");

        for _ in 0..4 {
            app.update();
        }
        assert!(app.world().get_entity(cart).is_err());
    }

    #[test]
    fn empty_spawn_request_creates_no_entity() {
        let mut app = app_with_period(4);
        app.world_mut().trigger(SpawnCart(SpawnRequest::new(Vec::new())));
        app.world_mut().flush();
        assert!(only_cart(&mut app).is_none());
    }
}

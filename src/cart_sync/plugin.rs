//! Bevy plugin wiring carts into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;

use crate::settings::{EffectProfile, StrideSettings};

use super::components::FrameClock;
use super::events::{StrideSyncError, StrideSyncErrorContext};
use super::inbox::StrideInbox;
use super::systems::{
    advance_frame_clock_system, apply_stride_commands_system, spawn_cart_observer,
    tick_carts_system,
};

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_stride_error(event: On<StrideSyncError>) {
    let StrideSyncError { context, detail } = event.event();
    error!("stride sync error during {context:?}: {detail}");
}

/// Bevy plugin driving [`Cart`](super::Cart) entities.
///
/// Installs the frame clock, the stride command inbox, the settings resource,
/// the spawn observer and the per-frame systems.
#[derive(Default)]
pub struct StridePlugin {
    settings: StrideSettings,
}

impl StridePlugin {
    /// Plugin using `settings` instead of the defaults.
    #[must_use]
    pub const fn with_settings(settings: StrideSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for StridePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_stride_error);

        if let Err(e) = self.settings.validate() {
            app.world_mut().trigger(StrideSyncError::new(
                StrideSyncErrorContext::Init,
                e.to_string(),
            ));
            return;
        }

        app.register_type::<StrideSettings>()
            .register_type::<EffectProfile>()
            .register_type::<FrameClock>();
        app.insert_resource(self.settings.clone());
        app.init_resource::<FrameClock>();
        app.init_resource::<StrideInbox>();
        app.add_observer(spawn_cart_observer);
        app.add_systems(
            Update,
            (
                advance_frame_clock_system,
                apply_stride_commands_system,
                tick_carts_system,
            )
                .chain(),
        );
    }
}

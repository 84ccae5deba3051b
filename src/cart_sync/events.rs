//! Observer events raised and consumed by the stride plugin.

use bevy::prelude::*;
use thiserror::Error;

use crate::effects::EffectRequest;
use crate::follower::SpawnRequest;

/// Request to spawn a cart. Carried payloads are item entities.
#[derive(Event, Debug, Clone)]
pub struct SpawnCart(pub SpawnRequest<Entity>);

/// A cart was spawned and is travelling.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSpawned {
    /// The new cart entity.
    pub cart: Entity,
}

/// A cart asked its host for an effect or a region change.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CartEffect {
    /// Cart that made the request.
    pub cart: Entity,
    /// The request itself.
    pub request: EffectRequest,
}

/// A cart reached the end of its life and is being despawned.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartRemoved {
    /// The cart entity; still alive while observers run.
    pub cart: Entity,
    /// Item the cart was carrying, handed back to the host.
    pub payload: Option<Entity>,
}

/// Where a [`StrideSyncError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrideSyncErrorContext {
    /// Plugin initialisation rejected its settings.
    Init,
    /// A [`SpawnCart`] request failed.
    Spawn,
}

/// Error surfaced by the stride plugin.
///
/// Observers log these so failures stay visible even without `bevy_log`.
#[derive(Event, Debug, Clone, Error)]
#[error("{context:?}: {detail}")]
pub struct StrideSyncError {
    /// Where the failure occurred.
    pub context: StrideSyncErrorContext,
    /// Description of the underlying error.
    pub detail: String,
}

impl StrideSyncError {
    /// Convenience constructor used by systems and observers.
    pub fn new(context: StrideSyncErrorContext, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}

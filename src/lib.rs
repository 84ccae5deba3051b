#![cfg_attr(docsrs, feature(doc_cfg))]
//! Discrete-stride path following for ghost carts.
//!
//! A follower walks a precomputed path under two clocks: a slow macro-tick
//! that says which waypoint to reach next, and the per-frame update that
//! interpolates smoothly by arc length in between. The core is plain Rust;
//! [`cart_sync`] plugs it into a Bevy world.
pub mod cart_sync;
pub mod constants;
pub mod effects;
pub mod error;
pub mod follower;
pub mod interpolate;
pub mod lifecycle;
pub mod logging;
pub mod numeric;
pub mod path;
pub mod region;
pub mod registry;
pub mod settings;
pub mod snapshot;
pub mod stride;

// Re-export commonly used items
pub use cart_sync::{
    Cart, CartEffect, CartRemoved, CartSpawned, FrameClock, SpawnCart, StrideCommand, StrideInbox,
    StridePlugin, StrideSyncError, StrideSyncErrorContext,
};
pub use effects::{
    AmbientAudio, AmbientVisual, EffectBackend, EffectRequest, EffectScheduler, TerminalEffect,
};
pub use error::SpawnError;
pub use follower::{Follower, SpawnRequest};
pub use interpolate::{Pose, Sample};
pub use lifecycle::{Lifecycle, LifecycleError, LifecycleState};
pub use logging::init as init_logging;
pub use path::{Path, PathError};
pub use region::RegionKey;
pub use registry::{FollowerId, FollowerRegistry, TickReport};
pub use settings::{EffectProfile, SettingsError, StrideSettings};
pub use snapshot::{FollowerSnapshot, Replica, ReplicaPose};
pub use stride::{StrideOutcome, StrideState};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use trundle::prelude::*;
    //! ```

    pub use crate::EffectBackend;
    pub use crate::EffectRequest;
    pub use crate::Follower;
    pub use crate::FollowerRegistry;
    pub use crate::LifecycleState;
    pub use crate::SpawnRequest;
    pub use crate::StridePlugin;
    pub use crate::StrideSettings;
    pub use glam::DVec3;
}

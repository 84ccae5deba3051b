//! Errors surfaced at the spawn boundary.

use thiserror::Error;

use crate::lifecycle::LifecycleError;
use crate::path::PathError;
use crate::settings::SettingsError;

/// Why a follower could not be created.
///
/// Every variant is reported once, synchronously, to the caller of `spawn`;
/// no partially initialised follower is ever handed out.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The supplied path had no waypoints.
    #[error("cannot spawn a follower on an empty path")]
    EmptyPath,
    /// The host already holds as many followers as it allows.
    #[error("follower capacity of {capacity} exhausted")]
    CapacityExhausted {
        /// Configured maximum number of live followers.
        capacity: usize,
    },
    /// The settings handed to spawn failed validation.
    #[error("invalid stride settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    /// The lifecycle refused the initial transition into travel.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl From<PathError> for SpawnError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::Empty => Self::EmptyPath,
        }
    }
}

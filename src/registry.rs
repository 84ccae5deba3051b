//! Host-side handle table for followers.
//!
//! [`FollowerRegistry`] is the plain-Rust host: it hands out [`FollowerId`]s,
//! routes stride commands and payload updates, drives one frame for every
//! live follower and reports removals so handles can be reclaimed.

use std::collections::BTreeMap;
use std::fmt;

use glam::DVec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::effects::EffectRequest;
use crate::error::SpawnError;
use crate::follower::{Follower, SpawnRequest};
use crate::lifecycle::LifecycleState;
use crate::settings::{SettingsError, StrideSettings};
use crate::snapshot::FollowerSnapshot;
use crate::stride::StrideOutcome;

/// Handle to a follower held by a [`FollowerRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FollowerId(pub u64);

impl fmt::Display for FollowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "follower#{}", self.0)
    }
}

/// What one call to [`FollowerRegistry::tick_all`] produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Effect requests in follower-id order, tagged with their source.
    pub effects: Vec<(FollowerId, EffectRequest)>,
    /// Followers that reached `Removed` this frame and were dropped.
    pub removed: Vec<FollowerId>,
}

/// Owns every live follower of one host.
#[derive(Debug)]
pub struct FollowerRegistry<P> {
    followers: BTreeMap<FollowerId, Follower<P>>,
    next_id: u64,
    settings: StrideSettings,
}

impl<P> FollowerRegistry<P> {
    /// Creates an empty registry using `settings` for every follower.
    ///
    /// # Errors
    /// Returns the first validation failure of `settings`.
    pub fn new(settings: StrideSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            followers: BTreeMap::new(),
            next_id: 0,
            settings,
        })
    }

    /// Settings shared by the registry's followers.
    #[must_use]
    pub const fn settings(&self) -> &StrideSettings {
        &self.settings
    }

    /// Spawns a follower at frame `now`.
    ///
    /// # Errors
    /// [`SpawnError::CapacityExhausted`] when the configured capacity is
    /// reached, otherwise the errors of [`Follower::spawn`].
    pub fn spawn(&mut self, request: SpawnRequest<P>, now: u64) -> Result<FollowerId, SpawnError> {
        if let Some(capacity) = self.settings.capacity {
            if self.followers.len() >= capacity {
                warn!("spawn rejected: {capacity} followers already live");
                return Err(SpawnError::CapacityExhausted { capacity });
            }
        }
        let follower = Follower::spawn(request, now, &self.settings)?;
        let id = FollowerId(self.next_id);
        self.next_id += 1;
        self.followers.insert(id, follower);
        debug!("{id} registered");
        Ok(id)
    }

    /// Routes a stride command; `None` when `id` is unknown.
    pub fn advance_to(
        &mut self,
        id: FollowerId,
        segment: usize,
        now: u64,
    ) -> Option<StrideOutcome> {
        self.followers
            .get_mut(&id)
            .map(|follower| follower.advance_to(segment, now))
    }

    /// Replaces a follower's route; returns `false` when `id` is unknown.
    pub fn replace_path(&mut self, id: FollowerId, waypoints: Vec<DVec3>, now: u64) -> bool {
        let Some(follower) = self.followers.get_mut(&id) else {
            return false;
        };
        follower.replace_path(waypoints, now);
        true
    }

    /// Attaches a payload; returns `false` when `id` is unknown.
    pub fn set_payload(&mut self, id: FollowerId, payload: P) -> bool {
        let Some(follower) = self.followers.get_mut(&id) else {
            return false;
        };
        follower.set_payload(payload);
        true
    }

    /// Payload carried by `id`.
    #[must_use]
    pub fn payload(&self, id: FollowerId) -> Option<&P> {
        self.followers.get(&id).and_then(Follower::payload)
    }

    /// Borrows a live follower.
    #[must_use]
    pub fn get(&self, id: FollowerId) -> Option<&Follower<P>> {
        self.followers.get(&id)
    }

    /// Number of live followers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.followers.len()
    }

    /// Whether no follower is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    /// Live follower ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<FollowerId> {
        self.followers.keys().copied().collect()
    }

    /// Runs one frame for every live follower, in id order.
    ///
    /// Followers that reach [`LifecycleState::Removed`] are dropped and listed
    /// in [`TickReport::removed`].
    pub fn tick_all(&mut self, now: u64) -> TickReport {
        let mut report = TickReport::default();
        let mut requests = Vec::new();
        self.followers.retain(|&id, follower| {
            let state = follower.tick(now, &mut requests);
            report
                .effects
                .extend(requests.drain(..).map(|request| (id, request)));
            if state != LifecycleState::Removed {
                return true;
            }
            debug!("{id} removed at frame {now}");
            report.removed.push(id);
            false
        });
        report
    }
}

impl<P: Clone> FollowerRegistry<P> {
    /// Snapshot of `id` for presentation.
    #[must_use]
    pub fn snapshot(&self, id: FollowerId) -> Option<FollowerSnapshot<P>> {
        self.followers.get(&id).map(Follower::snapshot)
    }
}

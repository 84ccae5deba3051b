//! The kinematic follower: one actor walking a supplied path.
//!
//! A [`Follower`] composes the path, the stride controller, the interpolation
//! engine, the effect scheduler and the lifecycle. Hosts drive it with two
//! calls: [`Follower::advance_to`] whenever the macro-tick scheduler issues a
//! new target, and [`Follower::tick`] once per frame.

use glam::{DVec3, IVec3};
use log::{debug, error, log, warn, Level};

use crate::constants::DEGENERATE_EDGE_EPSILON;
use crate::effects::{EffectBackend, EffectScheduler};
use crate::error::SpawnError;
use crate::interpolate::{self, Pose, Sample};
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::numeric::frames_to_f64;
use crate::path::{cell_centre, Path};
use crate::region::RegionTracker;
use crate::settings::StrideSettings;
use crate::snapshot::FollowerSnapshot;
use crate::stride::{StrideOutcome, StrideState};

/// Everything needed to spawn a follower.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest<P> {
    /// Waypoints in travel order before any reversal.
    pub waypoints: Vec<DVec3>,
    /// Travel the waypoints last to first.
    pub reversed: bool,
    /// Item carried for the duration of travel.
    pub payload: Option<P>,
    /// Free-form label naming who asked for the follower, used in logs.
    pub origin: Option<String>,
}

impl<P> SpawnRequest<P> {
    /// Request for a follower walking `waypoints` in order.
    #[must_use]
    pub const fn new(waypoints: Vec<DVec3>) -> Self {
        Self {
            waypoints,
            reversed: false,
            payload: None,
            origin: None,
        }
    }

    /// Request for a follower walking through the centres of grid `cells`.
    #[must_use]
    pub fn from_cells(cells: &[IVec3]) -> Self {
        Self::new(cells.iter().map(|cell| cell_centre(*cell)).collect())
    }

    /// Sets whether the waypoints are travelled in reverse.
    #[must_use]
    pub const fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Attaches a carried payload.
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Labels the request with its origin for logging.
    #[must_use]
    pub fn from_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// One actor following a path under macro-tick stride commands.
///
/// `P` is the carried payload. The follower never inspects it.
#[derive(Clone, Debug)]
pub struct Follower<P> {
    path: Option<Path>,
    stride: StrideState,
    lifecycle: Lifecycle,
    scheduler: EffectScheduler,
    pose: Pose,
    velocity_hint: DVec3,
    region: RegionTracker,
    payload: Option<P>,
    macro_tick_period: u64,
    region_size: f64,
    trace: bool,
    origin: Option<String>,
}

impl<P> Follower<P> {
    /// Spawns a follower at frame `now`.
    ///
    /// The follower starts parked on its first waypoint with a zero-length
    /// stride, so its first frame does not jump.
    ///
    /// # Errors
    /// [`SpawnError::EmptyPath`] when the request has no waypoints and
    /// [`SpawnError::InvalidSettings`] when `settings` fail validation.
    pub fn spawn(
        request: SpawnRequest<P>,
        now: u64,
        settings: &StrideSettings,
    ) -> Result<Self, SpawnError> {
        settings.validate()?;
        let SpawnRequest {
            waypoints,
            reversed,
            payload,
            origin,
        } = request;

        let mut lifecycle = Lifecycle::spawn(waypoints.len());
        if lifecycle.state() == LifecycleState::Invalid {
            debug!("follower from {} rejected: empty path", label(origin.as_deref()));
            return Err(SpawnError::EmptyPath);
        }
        let forward = Path::new(waypoints)?;
        let path = if reversed { forward.reversed() } else { forward };
        lifecycle.advance(LifecycleState::Traveling)?;

        let follower = Self {
            pose: Pose::at_rest(path.first()),
            path: Some(path),
            stride: StrideState::initial(now),
            lifecycle,
            scheduler: EffectScheduler::new(settings),
            velocity_hint: DVec3::ZERO,
            region: RegionTracker::default(),
            payload,
            macro_tick_period: settings.macro_tick_period,
            region_size: settings.region_size,
            trace: settings.trace,
            origin,
        };
        log!(
            follower.trace_level(),
            "follower from {} spawned at frame {now} with {} waypoints",
            label(follower.origin.as_deref()),
            follower.path.as_ref().map_or(0, Path::len)
        );
        Ok(follower)
    }

    /// Offers a macro-tick stride command for waypoint `segment`.
    ///
    /// Commands arriving outside [`LifecycleState::Traveling`] are stale.
    pub fn advance_to(&mut self, segment: usize, now: u64) -> StrideOutcome {
        if self.lifecycle.state() != LifecycleState::Traveling {
            return StrideOutcome::Stale;
        }
        match &self.path {
            Some(path) => self.stride.advance_to(segment, now, path),
            None => StrideOutcome::Stale,
        }
    }

    /// Processes one frame at frame-clock time `now`.
    ///
    /// Returns the state after the frame. Followers that are not travelling
    /// or completing ignore the call.
    pub fn tick<B>(&mut self, now: u64, backend: &mut B) -> LifecycleState
    where
        B: EffectBackend + ?Sized,
    {
        match self.lifecycle.state() {
            LifecycleState::Traveling => self.travel(now, backend),
            LifecycleState::Completing => self.complete(backend),
            state @ (LifecycleState::Invalid
            | LifecycleState::Spawned
            | LifecycleState::Removed) => state,
        }
    }

    fn travel<B>(&mut self, now: u64, backend: &mut B) -> LifecycleState
    where
        B: EffectBackend + ?Sized,
    {
        let frame = self.lifecycle.next_frame();
        let Some(path) = self.path.as_ref() else {
            warn!(
                "follower from {} lost its path mid-travel; removing",
                label(self.origin.as_deref())
            );
            self.remove(backend);
            return self.lifecycle.state();
        };

        let period = self.macro_tick_period;
        let moving = match interpolate::sample(path, &self.stride, now, period, &self.pose) {
            Sample::Waiting => false,
            Sample::OnEdge(pose) => {
                self.pose = pose;
                true
            }
            Sample::Overrun(pose) => {
                let covered = self.stride.arc_length() > DEGENERATE_EDGE_EPSILON;
                self.pose = pose;
                self.stride.consume();
                covered
            }
        };

        self.velocity_hint = if moving {
            self.pose.direction * self.stride.arc_length() / frames_to_f64(period.max(1))
        } else {
            DVec3::ZERO
        };
        if moving {
            self.scheduler.fire_ambient(frame, &self.pose, backend);
        }
        if let Some((previous, current)) = self.region.observe(self.pose.position, self.region_size)
        {
            backend.retain_region(previous, current);
        }

        let final_target = self.stride.target() >= path.last_index();
        let elapsed = now.saturating_sub(self.stride.started_at()) >= period;
        if final_target && (elapsed || !self.stride.is_active()) {
            self.transition(LifecycleState::Completing);
            log!(
                self.trace_level(),
                "follower from {} arrived at frame {now}",
                label(self.origin.as_deref())
            );
        }
        self.lifecycle.state()
    }

    fn complete<B>(&mut self, backend: &mut B) -> LifecycleState
    where
        B: EffectBackend + ?Sized,
    {
        self.lifecycle.next_frame();
        self.velocity_hint = DVec3::ZERO;
        self.scheduler.fire_terminal(&self.pose, backend);
        self.remove(backend);
        log!(
            self.trace_level(),
            "follower from {} completed after {} frames",
            label(self.origin.as_deref()),
            self.lifecycle.frames()
        );
        self.lifecycle.state()
    }

    fn remove<B>(&mut self, backend: &mut B)
    where
        B: EffectBackend + ?Sized,
    {
        if let Some(region) = self.region.release() {
            backend.release_region(region);
        }
        self.transition(LifecycleState::Removed);
    }

    fn transition(&mut self, to: LifecycleState) {
        if let Err(err) = self.lifecycle.advance(to) {
            error!("follower from {}: {err}", label(self.origin.as_deref()));
        }
    }

    fn trace_level(&self) -> Level {
        if self.trace {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Replaces the route wholesale and parks the follower on the new first
    /// waypoint at frame `now`.
    ///
    /// An empty `waypoints` list clears the path; the next frame removes the
    /// follower without an arrival effect.
    pub fn replace_path(&mut self, waypoints: Vec<DVec3>, now: u64) {
        self.path = Path::new(waypoints).ok();
        self.stride = StrideState::initial(now);
        self.velocity_hint = DVec3::ZERO;
        if let Some(path) = &self.path {
            self.pose.position = path.first();
            debug!(
                "follower from {} rerouted onto {} waypoints",
                label(self.origin.as_deref()),
                path.len()
            );
        }
    }

    /// Attaches or replaces the carried payload.
    pub fn set_payload(&mut self, payload: P) {
        self.payload = Some(payload);
    }

    /// The carried payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Detaches and returns the carried payload.
    pub fn take_payload(&mut self) -> Option<P> {
        self.payload.take()
    }

    /// Current position and facing.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current stride bookkeeping.
    #[must_use]
    pub const fn stride(&self) -> &StrideState {
        &self.stride
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Velocity replicas may extrapolate with, in distance per frame.
    #[must_use]
    pub const fn velocity_hint(&self) -> DVec3 {
        self.velocity_hint
    }

    /// The path being followed, or `None` once it has been cleared.
    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Origin label supplied at spawn.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl<P: Clone> Follower<P> {
    /// Read-only view for presentation and replication.
    #[must_use]
    pub fn snapshot(&self) -> FollowerSnapshot<P> {
        FollowerSnapshot {
            position: self.pose.position,
            heading: self.pose.heading,
            velocity_hint: self.velocity_hint,
            state: self.lifecycle.state(),
            payload: self.payload.clone(),
        }
    }
}

fn label(origin: Option<&str>) -> &str {
    origin.unwrap_or("<unknown>")
}

//! Ambient and terminal effect requests.
//!
//! The follower decides *when* an effect should happen and *with what
//! parameters*; an [`EffectBackend`] decides how to realise it. Requests are
//! fire-and-forget.

use glam::DVec3;
use serde::Serialize;

use crate::interpolate::Pose;
use crate::region::RegionKey;
use crate::settings::{EffectProfile, StrideSettings};

/// Trail particles behind a moving follower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AmbientVisual {
    /// Where the particles appear.
    pub position: DVec3,
    /// Direction of travel, for backends that orient the trail.
    pub direction_hint: DVec3,
    /// Number of particles.
    pub count: u32,
    /// Random spread around `position`.
    pub spread: f64,
}

/// Rolling sound at the follower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AmbientAudio {
    /// Sound source position.
    pub position: DVec3,
    /// Playback volume.
    pub volume: f32,
    /// Playback pitch.
    pub pitch: f32,
}

/// One-shot arrival effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TerminalEffect {
    /// Where the follower arrived.
    pub position: DVec3,
    /// Particles in the arrival burst.
    pub particle_count: u32,
    /// Random spread of the burst.
    pub spread: f64,
    /// Arrival sound volume.
    pub volume: f32,
    /// Arrival sound pitch.
    pub pitch: f32,
}

/// Any request a follower can make of its host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectRequest {
    /// See [`AmbientVisual`].
    AmbientVisual(AmbientVisual),
    /// See [`AmbientAudio`].
    AmbientAudio(AmbientAudio),
    /// See [`TerminalEffect`].
    Terminal(TerminalEffect),
    /// Keep `current` resident; `previous` may be let go.
    RetainRegion {
        /// Region retained before this request.
        previous: Option<RegionKey>,
        /// Region the follower now occupies.
        current: RegionKey,
    },
    /// The follower is gone; `region` no longer needs to stay resident.
    ReleaseRegion {
        /// Region last retained by the follower.
        region: RegionKey,
    },
}

/// Host-side sink for follower requests.
#[cfg_attr(test, mockall::automock)]
pub trait EffectBackend {
    /// Requests one ambient trail effect.
    fn request_ambient_visual(&mut self, request: AmbientVisual);
    /// Requests one ambient rolling sound.
    fn request_ambient_audio(&mut self, request: AmbientAudio);
    /// Requests the one-shot arrival effect.
    fn request_terminal_effect(&mut self, request: TerminalEffect);
    /// Asks the host to keep the follower's region resident.
    fn retain_region(&mut self, _previous: Option<RegionKey>, _current: RegionKey) {}
    /// Tells the host a previously retained region is no longer needed.
    fn release_region(&mut self, _region: RegionKey) {}
}

impl EffectBackend for Vec<EffectRequest> {
    fn request_ambient_visual(&mut self, request: AmbientVisual) {
        self.push(EffectRequest::AmbientVisual(request));
    }

    fn request_ambient_audio(&mut self, request: AmbientAudio) {
        self.push(EffectRequest::AmbientAudio(request));
    }

    fn request_terminal_effect(&mut self, request: TerminalEffect) {
        self.push(EffectRequest::Terminal(request));
    }

    fn retain_region(&mut self, previous: Option<RegionKey>, current: RegionKey) {
        self.push(EffectRequest::RetainRegion { previous, current });
    }

    fn release_region(&mut self, region: RegionKey) {
        self.push(EffectRequest::ReleaseRegion { region });
    }
}

/// Decides which periodic effects fire on a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectScheduler {
    visual_period: u64,
    audio_period: u64,
    trail_offset: f64,
    trail_lift: f64,
    profile: EffectProfile,
}

impl EffectScheduler {
    /// Builds a scheduler from validated settings.
    ///
    /// Zero periods are raised to one frame.
    #[must_use]
    pub fn new(settings: &StrideSettings) -> Self {
        Self {
            visual_period: settings.ambient_visual_period.max(1),
            audio_period: settings.ambient_audio_period.max(1),
            trail_offset: settings.trail_offset,
            trail_lift: settings.trail_lift,
            profile: settings.effects,
        }
    }

    /// Fires the ambient effects due on `frame` for a follower at `pose`.
    ///
    /// Callers only invoke this while the follower is mid-stride.
    pub fn fire_ambient<B>(&self, frame: u64, pose: &Pose, backend: &mut B)
    where
        B: EffectBackend + ?Sized,
    {
        if frame % self.visual_period == 0 {
            backend.request_ambient_visual(self.trail(pose));
        }
        if frame % self.audio_period == 0 {
            backend.request_ambient_audio(AmbientAudio {
                position: pose.position,
                volume: self.profile.ambient_volume,
                pitch: self.profile.ambient_pitch,
            });
        }
    }

    /// Fires the arrival effect for a follower at `pose`.
    pub fn fire_terminal<B>(&self, pose: &Pose, backend: &mut B)
    where
        B: EffectBackend + ?Sized,
    {
        backend.request_terminal_effect(TerminalEffect {
            position: pose.position,
            particle_count: self.profile.terminal_particle_count,
            spread: self.profile.terminal_particle_spread,
            volume: self.profile.terminal_volume,
            pitch: self.profile.terminal_pitch,
        });
    }

    fn trail(&self, pose: &Pose) -> AmbientVisual {
        let behind = pose.position - pose.direction * self.trail_offset;
        AmbientVisual {
            position: behind + DVec3::Y * self.trail_lift,
            direction_hint: pose.direction,
            count: self.profile.ambient_particle_count,
            spread: self.profile.ambient_particle_spread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mockall::predicate::always;
    use rstest::rstest;

    fn scheduler() -> EffectScheduler {
        EffectScheduler::new(&StrideSettings::default())
    }

    #[rstest]
    #[case::both_due(0, 1, 1)]
    #[case::visual_only(3, 1, 0)]
    #[case::neither(7, 0, 0)]
    #[case::audio_only(40, 0, 1)]
    #[case::both_again(120, 1, 1)]
    fn periodic_effects_follow_frame_counter(
        #[case] frame: u64,
        #[case] visuals: usize,
        #[case] sounds: usize,
    ) {
        let mut backend = MockEffectBackend::new();
        backend
            .expect_request_ambient_visual()
            .with(always())
            .times(visuals)
            .return_const(());
        backend
            .expect_request_ambient_audio()
            .times(sounds)
            .return_const(());
        backend.expect_request_terminal_effect().never();
        scheduler().fire_ambient(frame, &Pose::at_rest(DVec3::ZERO), &mut backend);
    }

    #[test]
    fn trail_sits_behind_the_follower() {
        let mut requests = Vec::new();
        let pose = Pose::facing(DVec3::new(5.0, 0.0, 0.0), DVec3::X);
        scheduler().fire_ambient(0, &pose, &mut requests);
        let Some(EffectRequest::AmbientVisual(trail)) = requests.first().copied() else {
            panic!("expected a trail request, got {requests:?}");
        };
        assert_relative_eq!(trail.position.x, 4.1);
        assert_relative_eq!(trail.position.y, 0.1);
        assert_eq!(trail.direction_hint, DVec3::X);
    }

    #[test]
    fn terminal_effect_carries_profile_parameters() {
        let mut requests = Vec::new();
        scheduler().fire_terminal(&Pose::at_rest(DVec3::ONE), &mut requests);
        assert_eq!(
            requests,
            vec![EffectRequest::Terminal(TerminalEffect {
                position: DVec3::ONE,
                particle_count: 4,
                spread: 0.3,
                volume: 0.3,
                pitch: 1.0,
            })]
        );
    }
}

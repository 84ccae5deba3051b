//! Runtime configuration for stride following.
//!
//! [`StrideSettings`] carries the macro-tick cadence, ambient effect periods
//! and effect parameters. It deserialises from JSON with every field
//! optional, so a settings file only needs the values it changes.

use std::fs;
use std::path::Path as FsPath;

use bevy::prelude::{Reflect, ReflectResource, Resource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AMBIENT_PARTICLE_COUNT, AMBIENT_PARTICLE_SPREAD, AMBIENT_PITCH, AMBIENT_VOLUME,
    DEFAULT_AMBIENT_AUDIO_PERIOD, DEFAULT_AMBIENT_VISUAL_PERIOD, DEFAULT_MACRO_TICK_PERIOD,
    DEFAULT_REGION_SIZE, DEFAULT_TRAIL_LIFT, DEFAULT_TRAIL_OFFSET, TERMINAL_PARTICLE_COUNT,
    TERMINAL_PARTICLE_SPREAD, TERMINAL_PITCH, TERMINAL_VOLUME,
};

/// Errors raised while loading or validating [`StrideSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file was not valid JSON for [`StrideSettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A period used as a divisor was zero.
    #[error("`{name}` must be at least one frame")]
    ZeroPeriod {
        /// Name of the offending field.
        name: &'static str,
    },
    /// A distance was negative, NaN or infinite, or a size was not positive.
    #[error("`{name}` must be finite and in range, got {value}")]
    InvalidDistance {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Parameters attached to every effect request.
#[derive(Reflect, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectProfile {
    /// Particles per ambient trail request.
    pub ambient_particle_count: u32,
    /// Spread of ambient trail particles.
    pub ambient_particle_spread: f64,
    /// Volume of the ambient rolling sound.
    pub ambient_volume: f32,
    /// Pitch of the ambient rolling sound.
    pub ambient_pitch: f32,
    /// Particles in the arrival burst.
    pub terminal_particle_count: u32,
    /// Spread of the arrival burst.
    pub terminal_particle_spread: f64,
    /// Volume of the arrival sound.
    pub terminal_volume: f32,
    /// Pitch of the arrival sound.
    pub terminal_pitch: f32,
}

impl Default for EffectProfile {
    fn default() -> Self {
        Self {
            ambient_particle_count: AMBIENT_PARTICLE_COUNT,
            ambient_particle_spread: AMBIENT_PARTICLE_SPREAD,
            ambient_volume: AMBIENT_VOLUME,
            ambient_pitch: AMBIENT_PITCH,
            terminal_particle_count: TERMINAL_PARTICLE_COUNT,
            terminal_particle_spread: TERMINAL_PARTICLE_SPREAD,
            terminal_volume: TERMINAL_VOLUME,
            terminal_pitch: TERMINAL_PITCH,
        }
    }
}

/// Tuning shared by every follower spawned under one host.
///
/// # Examples
///
/// ```
/// use trundle::settings::StrideSettings;
///
/// let settings = StrideSettings::from_json_str(r#"{ "macro_tick_period": 20 }"#)
///     .expect("valid settings");
/// assert_eq!(settings.macro_tick_period, 20);
/// assert_eq!(settings.ambient_visual_period, 3);
/// ```
#[derive(Resource, Reflect, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct StrideSettings {
    /// Frames one stride takes to traverse.
    pub macro_tick_period: u64,
    /// Frames between ambient trail particle requests.
    pub ambient_visual_period: u64,
    /// Frames between ambient rolling sound requests.
    pub ambient_audio_period: u64,
    /// Distance behind the actor where trail particles appear.
    pub trail_offset: f64,
    /// Height added to trail particle positions.
    pub trail_lift: f64,
    /// Planar edge length of one retained world region.
    pub region_size: f64,
    /// Promote per-follower lifecycle logs from `debug` to `info`.
    pub trace: bool,
    /// Upper bound on live followers per registry; `None` is unbounded.
    pub capacity: Option<usize>,
    /// Effect request parameters.
    pub effects: EffectProfile,
}

impl Default for StrideSettings {
    fn default() -> Self {
        Self {
            macro_tick_period: DEFAULT_MACRO_TICK_PERIOD,
            ambient_visual_period: DEFAULT_AMBIENT_VISUAL_PERIOD,
            ambient_audio_period: DEFAULT_AMBIENT_AUDIO_PERIOD,
            trail_offset: DEFAULT_TRAIL_OFFSET,
            trail_lift: DEFAULT_TRAIL_LIFT,
            region_size: DEFAULT_REGION_SIZE,
            trace: false,
            capacity: None,
            effects: EffectProfile::default(),
        }
    }
}

impl StrideSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON and the validation
    /// errors described on [`StrideSettings::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the errors of [`StrideSettings::from_json_str`].
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks that periods are non-zero and distances are usable.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroPeriod`] or
    /// [`SettingsError::InvalidDistance`] for the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, period) in [
            ("macro_tick_period", self.macro_tick_period),
            ("ambient_visual_period", self.ambient_visual_period),
            ("ambient_audio_period", self.ambient_audio_period),
        ] {
            if period == 0 {
                return Err(SettingsError::ZeroPeriod { name });
            }
        }
        for (name, value) in [
            ("trail_offset", self.trail_offset),
            ("trail_lift", self.trail_lift),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidDistance { name, value });
            }
        }
        if !self.region_size.is_finite() || self.region_size <= 0.0 {
            return Err(SettingsError::InvalidDistance {
                name: "region_size",
                value: self.region_size,
            });
        }
        Ok(())
    }
}

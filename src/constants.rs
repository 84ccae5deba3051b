//! Default tuning values for stride following.
//!
//! These seed [`StrideSettings`](crate::settings::StrideSettings); hosts
//! override them through a settings file or command-line flags.

/// Frames one stride is expected to take (the host's macro-tick cadence).
pub const DEFAULT_MACRO_TICK_PERIOD: u64 = 500;
/// Frames between ambient trail particles while mid-stride.
pub const DEFAULT_AMBIENT_VISUAL_PERIOD: u64 = 3;
/// Frames between ambient rolling sounds while mid-stride.
pub const DEFAULT_AMBIENT_AUDIO_PERIOD: u64 = 40;
/// Distance behind the actor at which trail particles appear.
pub const DEFAULT_TRAIL_OFFSET: f64 = 0.9;
/// Height added to trail particle positions.
pub const DEFAULT_TRAIL_LIFT: f64 = 0.1;
/// Edge length of one retained world region on the planar axes.
pub const DEFAULT_REGION_SIZE: f64 = 16.0;

/// Particles per ambient trail request.
pub const AMBIENT_PARTICLE_COUNT: u32 = 1;
/// Random spread applied to ambient trail particles.
pub const AMBIENT_PARTICLE_SPREAD: f64 = 0.1;
/// Volume of the ambient rolling sound.
pub const AMBIENT_VOLUME: f32 = 0.3;
/// Pitch of the ambient rolling sound.
pub const AMBIENT_PITCH: f32 = 1.0;
/// Particles in the arrival burst.
pub const TERMINAL_PARTICLE_COUNT: u32 = 4;
/// Random spread applied to the arrival burst.
pub const TERMINAL_PARTICLE_SPREAD: f64 = 0.3;
/// Volume of the arrival sound.
pub const TERMINAL_VOLUME: f32 = 0.3;
/// Pitch of the arrival sound.
pub const TERMINAL_PITCH: f32 = 1.0;

/// Edges shorter than this are treated as zero length during interpolation.
pub const DEGENERATE_EDGE_EPSILON: f64 = 1e-9;
/// Offset from a grid cell's corner to its centre on every axis.
pub const CELL_CENTRE_OFFSET: f64 = 0.5;

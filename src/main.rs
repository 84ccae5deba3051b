//! Headless driver: runs one ghost cart along a path and prints what it asks
//! of its host as JSON lines.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use clap::Parser;
use glam::DVec3;
use log::info;
use serde::Serialize;
use trundle::{
    init_logging, Cart, CartEffect, CartRemoved, CartSpawned, EffectRequest, FrameClock,
    SpawnCart, SpawnRequest, StrideCommand, StrideInbox, StridePlugin, StrideSettings,
};

/// Drive a ghost cart along a path, one macro-tick at a time
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of `[x, y, z]` waypoints; a demo track is
    /// used when omitted
    #[arg(long)]
    path: Option<PathBuf>,
    /// Travel the path from its last waypoint to its first
    #[arg(long)]
    reverse: bool,
    /// Waypoints to advance per macro-tick
    #[arg(long, default_value_t = 1)]
    step: usize,
    /// Frames per macro-tick, overriding the settings file
    #[arg(long)]
    period: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Line {
    Effect { frame: u64, request: EffectRequest },
    Summary { summary: Summary },
}

#[derive(Serialize)]
struct Summary {
    frames: u64,
    effects: usize,
    final_position: [f64; 3],
    final_heading: f64,
}

#[derive(Resource, Default)]
struct Transcript {
    cart: Option<Entity>,
    pending: Vec<EffectRequest>,
    effects: usize,
    finished: Option<([f64; 3], f64)>,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn record_spawn(event: On<CartSpawned>, mut transcript: ResMut<Transcript>) {
    transcript.cart = Some(event.event().cart);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn record_effect(event: On<CartEffect>, mut transcript: ResMut<Transcript>) {
    transcript.pending.push(event.event().request);
    transcript.effects += 1;
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn record_removal(event: On<CartRemoved>, carts: Query<&Cart>, mut transcript: ResMut<Transcript>) {
    let Ok(cart) = carts.get(event.event().cart) else {
        return;
    };
    let pose = cart.follower().pose();
    transcript.finished = Some((pose.position.to_array(), pose.heading));
}

const DEMO_TRACK: [[f64; 3]; 6] = [
    [0.5, 64.0, 0.5],
    [4.5, 64.0, 0.5],
    [4.5, 64.0, 6.5],
    [12.5, 65.0, 6.5],
    [20.5, 65.0, 18.5],
    [20.5, 64.0, 30.5],
];

fn load_waypoints(path: Option<&PathBuf>) -> Result<Vec<DVec3>> {
    let points: Vec<[f64; 3]> = match path {
        Some(file) => {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("reading waypoints from {}", file.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing waypoints in {}", file.display()))?
        }
        None => DEMO_TRACK.to_vec(),
    };
    Ok(points.into_iter().map(DVec3::from_array).collect())
}

fn load_settings(args: &Args) -> Result<StrideSettings> {
    let mut settings = match &args.config {
        Some(file) => StrideSettings::load(file)
            .with_context(|| format!("loading settings from {}", file.display()))?,
        None => StrideSettings::default(),
    };
    if let Some(period) = args.period {
        settings.macro_tick_period = period;
    }
    settings.validate().context("validating settings")?;
    Ok(settings)
}

/// Waypoint index commanded after `segment`; huge steps clamp instead of
/// wrapping, and the follower clamps the index into its path.
const fn next_segment(segment: usize, step: usize) -> usize {
    segment.saturating_add(step)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    let waypoints = load_waypoints(args.path.as_ref())?;
    let waypoint_count = waypoints.len();
    let period = settings.macro_tick_period;
    let step = args.step.max(1);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StridePlugin::with_settings(settings))
        .init_resource::<Transcript>()
        .add_observer(record_spawn)
        .add_observer(record_effect)
        .add_observer(record_removal);

    app.world_mut().trigger(SpawnCart(
        SpawnRequest::new(waypoints)
            .with_reversed(args.reverse)
            .from_origin("cli"),
    ));
    app.world_mut().flush();
    let Some(cart) = app.world().resource::<Transcript>().cart else {
        bail!("cart failed to spawn from {waypoint_count} waypoints");
    };
    info!("cart spawned on {waypoint_count} waypoints, {period} frames per stride");

    let strides = u64::try_from(waypoint_count / step + 2).unwrap_or(u64::MAX);
    let frame_limit = strides.saturating_mul(period).saturating_add(2);
    let mut segment = 0;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    loop {
        let now = app.world().resource::<FrameClock>().now();
        if now % period == 0 {
            segment = next_segment(segment, step);
            app.world_mut()
                .resource_mut::<StrideInbox>()
                .push(StrideCommand { cart, segment });
        }
        app.update();

        let frame = app.world().resource::<FrameClock>().now();
        let mut transcript = app.world_mut().resource_mut::<Transcript>();
        for request in transcript.pending.drain(..) {
            writeln!(out, "{}", serde_json::to_string(&Line::Effect { frame, request })?)?;
        }
        if let Some((final_position, final_heading)) = transcript.finished {
            let summary = Summary {
                frames: frame,
                effects: transcript.effects,
                final_position,
                final_heading,
            };
            writeln!(out, "{}", serde_json::to_string(&Line::Summary { summary })?)?;
            return Ok(());
        }
        if frame > frame_limit {
            bail!("cart did not finish within {frame_limit} frames");
        }
    }
}

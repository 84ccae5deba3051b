//! Integration tests for `StridePlugin` inside a Bevy app.

#[path = "support/cart_capture.rs"]
mod cart_capture;

use bevy::prelude::*;
use cart_capture::{install_cart_log, CartLog};
use glam::DVec3;
use rstest::{fixture, rstest};
use trundle::{
    Cart, EffectRequest, FrameClock, LifecycleState, SpawnCart, SpawnRequest, StrideCommand,
    StrideInbox, StridePlugin, StrideSettings,
};

fn build_app(settings: StrideSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    install_cart_log(&mut app);
    app.add_plugins(StridePlugin::with_settings(settings));
    app
}

#[fixture]
fn app() -> App {
    build_app(StrideSettings {
        macro_tick_period: 4,
        capacity: Some(1),
        ..StrideSettings::default()
    })
}

fn spawn_cart(app: &mut App, request: SpawnRequest<Entity>) -> Option<Entity> {
    app.world_mut().trigger(SpawnCart(request));
    app.world_mut().flush();
    app.world().resource::<CartLog>().spawned.last().copied()
}

fn command(app: &mut App, cart: Entity, segment: usize) {
    app.world_mut()
        .resource_mut::<StrideInbox>()
        .push(StrideCommand { cart, segment });
}

fn cart_state(app: &App, cart: Entity) -> Option<LifecycleState> {
    app.world().get::<Cart>(cart).map(|cart| cart.follower().state())
}

#[rstest]
fn cart_travels_and_hands_back_payload(mut app: App) {
    let ingot = app.world_mut().spawn_empty().id();
    let request = SpawnRequest::new(vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 8.0)])
        .with_payload(ingot);
    let cart = spawn_cart(&mut app, request).expect("cart spawned");

    command(&mut app, cart, 1);
    app.update();
    app.update();
    app.update();
    let transform = *app.world().get::<Transform>(cart).expect("cart transform");
    assert!((transform.translation.z - 4.0).abs() < 1e-5);
    let forward = transform.rotation * Vec3::X;
    assert!((forward.z - 1.0).abs() < 1e-5, "cart should face +Z, got {forward:?}");

    app.update();
    app.update();
    assert_eq!(cart_state(&app, cart), Some(LifecycleState::Completing));
    app.update();

    let log = app.world().resource::<CartLog>();
    assert_eq!(log.removed, vec![(cart, Some(ingot))]);
    assert_eq!(log.terminal_count(), 1);
    assert!(app.world().get_entity(cart).is_err());
    assert!(app.world().get_entity(ingot).is_ok());
}

#[rstest]
fn region_is_retained_then_released(mut app: App) {
    let cart = spawn_cart(
        &mut app,
        SpawnRequest::new(vec![DVec3::new(1.0, 0.0, 1.0), DVec3::new(40.0, 0.0, 1.0)]),
    )
    .expect("cart spawned");
    command(&mut app, cart, 1);
    for _ in 0..7 {
        app.update();
    }
    let log = app.world().resource::<CartLog>();
    let regions: Vec<_> = log
        .effects
        .iter()
        .filter_map(|(_, request)| match request {
            EffectRequest::RetainRegion { current, .. } => Some(current.x),
            EffectRequest::ReleaseRegion { region } => Some(-1 - region.x),
            _ => None,
        })
        .collect();
    assert_eq!(regions.first(), Some(&0));
    assert_eq!(regions.last(), Some(&-3));
}

#[rstest]
fn commands_for_unknown_carts_are_dropped(mut app: App) {
    let stranger = app.world_mut().spawn_empty().id();
    command(&mut app, stranger, 3);
    app.update();
    assert!(app.world().resource::<StrideInbox>().is_empty());
    assert_eq!(app.world().resource::<FrameClock>().now(), 1);
}

#[rstest]
#[case::empty_path(Vec::new(), "empty path")]
fn failed_spawn_reports_error(
    mut app: App,
    #[case] waypoints: Vec<DVec3>,
    #[case] fragment: &str,
) {
    assert!(spawn_cart(&mut app, SpawnRequest::new(waypoints)).is_none());
    let log = app.world().resource::<CartLog>();
    let (context, detail) = log.errors.first().expect("error captured");
    assert_eq!(context, "Spawn");
    assert!(detail.contains(fragment), "unexpected detail: {detail}");
}

#[rstest]
fn capacity_limits_live_carts(mut app: App) {
    let first = spawn_cart(&mut app, SpawnRequest::new(vec![DVec3::ZERO, DVec3::X]));
    assert!(first.is_some());
    spawn_cart(&mut app, SpawnRequest::new(vec![DVec3::ZERO, DVec3::X]));
    let log = app.world().resource::<CartLog>();
    assert_eq!(log.spawned.len(), 1);
    assert!(log
        .errors
        .iter()
        .any(|(_, detail)| detail.contains("capacity")));
}

#[test]
fn invalid_settings_are_reported_at_init() {
    let app = build_app(StrideSettings {
        region_size: -1.0,
        ..StrideSettings::default()
    });
    let log = app.world().resource::<CartLog>();
    assert_eq!(log.errors.len(), 1);
    assert_eq!(log.errors.first().map(|(context, _)| context.as_str()), Some("Init"));
}

//! End-to-end stride scenarios driven through the follower registry.

use approx::assert_relative_eq;
use glam::DVec3;
use rstest::{fixture, rstest};
use test_utils::{assert_on_segment, assert_vec_near, elbow_waypoints};
use trundle::{
    EffectRequest, FollowerId, FollowerRegistry, LifecycleState, SpawnError, SpawnRequest,
    StrideOutcome, StrideSettings,
};

fn registry_with_period(period: u64) -> FollowerRegistry<u32> {
    FollowerRegistry::new(StrideSettings {
        macro_tick_period: period,
        ..StrideSettings::default()
    })
    .expect("valid settings")
}

#[fixture]
fn line() -> (FollowerRegistry<u32>, FollowerId) {
    let mut registry = registry_with_period(20);
    let id = registry
        .spawn(
            SpawnRequest::new(vec![DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)]),
            0,
        )
        .expect("spawn on two waypoints");
    (registry, id)
}

fn position(registry: &FollowerRegistry<u32>, id: FollowerId) -> DVec3 {
    registry
        .snapshot(id)
        .map(|snapshot| snapshot.position)
        .expect("follower still live")
}

#[rstest]
fn halfway_at_frame_ten_then_completing(line: (FollowerRegistry<u32>, FollowerId)) {
    let (mut registry, id) = line;
    registry.advance_to(id, 1, 0);
    for now in 0..=10 {
        registry.tick_all(now);
    }
    assert_vec_near(position(&registry, id), DVec3::new(5.0, 0.0, 0.0), 1e-9);

    for now in 11..=20 {
        registry.tick_all(now);
    }
    assert_vec_near(position(&registry, id), DVec3::new(10.0, 0.0, 0.0), 1e-9);
    let state = registry.snapshot(id).map(|snapshot| snapshot.state);
    assert_eq!(state, Some(LifecycleState::Completing));

    let report = registry.tick_all(21);
    assert_eq!(report.removed, vec![id]);
    assert!(report
        .effects
        .iter()
        .any(|(_, request)| matches!(request, EffectRequest::Terminal(_))));
}

#[rstest]
#[case::start_of_stride(0, DVec3::ZERO)]
#[case::inner_waypoint(30, DVec3::new(3.0, 0.0, 0.0))]
#[case::up_the_second_edge(50, DVec3::new(3.0, 2.0, 0.0))]
#[case::end_of_stride(70, DVec3::new(3.0, 4.0, 0.0))]
fn elbow_interpolates_by_arc_length(#[case] now: u64, #[case] expected: DVec3) {
    let mut registry = registry_with_period(70);
    let id = registry
        .spawn(SpawnRequest::new(elbow_waypoints()), 0)
        .expect("spawn on elbow");
    registry.advance_to(id, 2, 0);
    registry.tick_all(now);
    assert_vec_near(position(&registry, id), expected, 1e-9);
}

#[rstest]
fn repeated_target_is_not_stale_but_lower_is(line: (FollowerRegistry<u32>, FollowerId)) {
    let (mut registry, id) = line;
    assert_eq!(
        registry.advance_to(id, 1, 0),
        Some(StrideOutcome::Accepted { start: 0, target: 1 })
    );
    assert_eq!(
        registry.advance_to(id, 1, 0),
        Some(StrideOutcome::Accepted { start: 1, target: 1 })
    );
    assert_eq!(registry.advance_to(id, 0, 0), Some(StrideOutcome::Stale));
    assert_eq!(registry.advance_to(id, 1, 0), Some(StrideOutcome::Stale));
}

#[test]
fn empty_path_is_a_spawn_failure() {
    let mut registry = registry_with_period(20);
    let result = registry.spawn(SpawnRequest::new(Vec::new()), 0);
    assert!(matches!(result, Err(SpawnError::EmptyPath)));
    assert!(registry.is_empty());
}

#[test]
fn target_is_non_decreasing_under_jittered_commands() {
    let waypoints: Vec<_> = (0..12)
        .map(|i| DVec3::new(f64::from(i), 0.0, f64::from(i % 3)))
        .collect();
    let mut registry = registry_with_period(5);
    let id = registry
        .spawn(SpawnRequest::new(waypoints), 0)
        .expect("spawn");

    let commands = [2, 1, 4, 4, 3, 7, 5, 9, 8, 30];
    let mut last_target = 0;
    for (tick, segment) in (0_u64..).zip(commands) {
        registry.advance_to(id, segment, tick * 5);
        let target = registry
            .get(id)
            .map(|follower| follower.stride().target())
            .expect("live follower");
        assert!(target >= last_target, "target went from {last_target} to {target}");
        last_target = target;
        registry.tick_all(tick * 5);
    }
}

#[test]
fn position_stays_on_commanded_sub_path() {
    let waypoints = vec![
        DVec3::ZERO,
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 5.0),
        DVec3::new(6.0, 1.0, 5.0),
    ];
    let mut registry = registry_with_period(16);
    let id = registry
        .spawn(SpawnRequest::new(waypoints.clone()), 0)
        .expect("spawn");
    registry.advance_to(id, 1, 0);
    registry.advance_to(id, 3, 0);
    for now in 0..16 {
        registry.tick_all(now);
        let here = position(&registry, id);
        let on_second = (here - waypoints[1]).cross(waypoints[2] - waypoints[1]).length() < 1e-9;
        if on_second {
            assert_on_segment(here, waypoints[1], waypoints[2], 1e-9);
        } else {
            assert_on_segment(here, waypoints[2], waypoints[3], 1e-9);
        }
    }
}

#[test]
fn single_waypoint_completes_without_commands() {
    let mut registry = registry_with_period(20);
    let id = registry
        .spawn(SpawnRequest::new(vec![DVec3::ONE]).with_payload(5), 0)
        .expect("spawn");
    assert_eq!(registry.advance_to(id, 1, 0), Some(StrideOutcome::Stale));
    let first = registry.tick_all(0);
    assert!(first.removed.is_empty());
    let second = registry.tick_all(1);
    assert_eq!(second.removed, vec![id]);
    let terminal = second
        .effects
        .iter()
        .find_map(|(_, request)| match request {
            EffectRequest::Terminal(effect) => Some(*effect),
            _ => None,
        })
        .expect("terminal effect");
    assert_vec_near(terminal.position, DVec3::ONE, 1e-12);
    assert_relative_eq!(terminal.spread, 0.3);
}

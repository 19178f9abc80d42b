use super::RecordingScheduler;
use crate::playback::{PlaybackConfig, PlaybackSimulator, PlaybackUpdate};
use crate::route_model::RouteModel;
use common::error::NavigationError;
use common::navigation::{PlaybackPhase, SpeedMultiplier};
use common::position::Position;
use common::route::RouteDescription;
use common::test_helper::route::get_kilometer_route;
use std::time::Duration;

fn simulator_with_speed(speed_base_mps: f64) -> PlaybackSimulator {
    PlaybackSimulator::new(PlaybackConfig {
        speed_base_mps,
        ..PlaybackConfig::default()
    })
}

fn seconds(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn east_route() -> RouteModel {
    RouteModel::new(RouteDescription {
        geometry: vec![
            Position::from_lng_lat(0.0, 0.0),
            Position::from_lng_lat(0.001, 0.0),
        ],
        steps: vec![],
        summary: None,
    })
    .unwrap()
}

fn run_ticks(
    simulator: &mut PlaybackSimulator,
    route: &RouteModel,
    scheduler: &mut RecordingScheduler,
    timestamps: &[f64],
) -> Vec<Option<PlaybackUpdate>> {
    timestamps
        .iter()
        .map(|t| simulator.tick(seconds(*t), route, scheduler))
        .collect()
}

#[test]
fn start_without_route_is_refused() {
    let mut simulator = PlaybackSimulator::default();
    let mut scheduler = RecordingScheduler::default();
    assert_eq!(
        simulator.start(None, &mut scheduler),
        Err(NavigationError::NoRouteLoaded)
    );
    assert_eq!(simulator.phase(), PlaybackPhase::Idle);
    assert!(scheduler.requested.is_empty());
}

#[test]
fn start_on_zero_length_route_is_refused() {
    let route = RouteModel::new(RouteDescription {
        geometry: vec![Position::new(1.0, 1.0), Position::new(1.0, 1.0)],
        steps: vec![],
        summary: None,
    })
    .unwrap();
    let mut simulator = PlaybackSimulator::default();
    let mut scheduler = RecordingScheduler::default();
    assert_eq!(
        simulator.start(Some(&route), &mut scheduler),
        Err(NavigationError::NoRouteLoaded)
    );
    assert_eq!(simulator.phase(), PlaybackPhase::Idle);
}

#[test]
fn first_tick_only_sets_time_baseline() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    assert_eq!(scheduler.requested.len(), 1);

    let update = simulator
        .tick(seconds(42.0), &route, &mut scheduler)
        .unwrap();
    assert_eq!(update.traveled_m, 0.0);
    assert_eq!(update.position, route.geometry()[0]);
    assert!(!update.finished);
    assert_eq!(scheduler.requested.len(), 2);
}

#[test]
fn kilometer_route_at_ten_meters_per_second() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();

    let updates = run_ticks(
        &mut simulator,
        &route,
        &mut scheduler,
        &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
    );
    assert!(updates.iter().all(Option::is_some));
    assert!((simulator.traveled_distance() - 500.0).abs() < 1e-6);
    assert_eq!(simulator.phase(), PlaybackPhase::Running);

    let updates = run_ticks(
        &mut simulator,
        &route,
        &mut scheduler,
        &[60.0, 70.0, 80.0, 90.0, 101.0, 110.0, 120.0],
    );
    let finished: Vec<&PlaybackUpdate> = updates
        .iter()
        .flatten()
        .filter(|update| update.finished)
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].position, *route.geometry().last().unwrap());
    assert_eq!(finished[0].traveled_m, route.total_distance());
    assert_eq!(updates[5], None);
    assert_eq!(updates[6], None);
    assert_eq!(simulator.phase(), PlaybackPhase::Finished);
    assert_eq!(simulator.traveled_distance(), route.total_distance());
    // start plus one request per tick that did not reach the end
    assert_eq!(scheduler.requested.len(), 11);
    assert!(scheduler.cancelled.is_empty());
    assert_eq!(simulator.pending_frame(), None);
}

#[test]
fn each_running_tick_requests_exactly_one_frame() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 1.0, 2.0]);
    assert_eq!(scheduler.requested.len(), 4);
    assert_eq!(simulator.pending_frame(), scheduler.requested.last().copied());
}

#[test]
fn stop_cancels_pending_frame_and_ignores_late_ticks() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 5.0]);
    let pending = simulator.pending_frame().unwrap();

    assert!(simulator.stop(&mut scheduler));
    assert_eq!(scheduler.cancelled, vec![pending]);
    assert_eq!(simulator.phase(), PlaybackPhase::Idle);
    assert_eq!(simulator.traveled_distance(), 0.0);
    assert_eq!(simulator.tick(seconds(6.0), &route, &mut scheduler), None);
    assert!(!simulator.stop(&mut scheduler));
}

#[test]
fn restart_after_finish_begins_at_zero() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(100.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 20.0]);
    assert_eq!(simulator.phase(), PlaybackPhase::Finished);

    simulator.start(Some(&route), &mut scheduler).unwrap();
    assert_eq!(simulator.phase(), PlaybackPhase::Running);
    let update = simulator
        .tick(seconds(30.0), &route, &mut scheduler)
        .unwrap();
    assert_eq!(update.traveled_m, 0.0);
}

#[test]
fn multiplier_cycles_and_scales_speed() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    assert_eq!(simulator.cycle_speed_multiplier(), SpeedMultiplier::X2);
    assert_eq!(simulator.phase(), PlaybackPhase::Idle);

    simulator.start(Some(&route), &mut scheduler).unwrap();
    run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 10.0]);
    assert!((simulator.traveled_distance() - 200.0).abs() < 1e-9);

    assert_eq!(simulator.cycle_speed_multiplier(), SpeedMultiplier::X4);
    run_ticks(&mut simulator, &route, &mut scheduler, &[15.0]);
    assert!((simulator.traveled_distance() - 400.0).abs() < 1e-9);
    assert_eq!(simulator.speed_mps(), 40.0);

    assert_eq!(simulator.cycle_speed_multiplier(), SpeedMultiplier::X1);
    assert_eq!(simulator.status().multiplier, SpeedMultiplier::X1);
}

#[test]
fn heading_follows_route_and_holds_at_end() {
    let route = east_route();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    let updates = run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 5.0, 20.0]);
    for update in updates.iter().flatten() {
        assert!((update.heading_deg - 90.0).abs() < 1e-9);
    }
    assert!(updates[2].unwrap().finished);
}

#[test]
fn identical_ticks_replay_identically() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let timestamps = [3.0, 3.016, 3.05, 4.2, 9.9, 17.0, 40.0, 80.0];
    let replay = || {
        let mut simulator = PlaybackSimulator::default();
        let mut scheduler = RecordingScheduler::default();
        simulator.cycle_speed_multiplier();
        simulator.start(Some(&route), &mut scheduler).unwrap();
        run_ticks(&mut simulator, &route, &mut scheduler, &timestamps)
    };
    assert_eq!(replay(), replay());
}

#[test]
fn reset_returns_to_idle_and_keeps_multiplier() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let mut simulator = simulator_with_speed(10.0);
    let mut scheduler = RecordingScheduler::default();
    simulator.cycle_speed_multiplier();
    simulator.start(Some(&route), &mut scheduler).unwrap();
    run_ticks(&mut simulator, &route, &mut scheduler, &[0.0, 1.0]);

    simulator.reset(&mut scheduler);
    assert_eq!(simulator.phase(), PlaybackPhase::Idle);
    assert_eq!(simulator.pending_frame(), None);
    assert_eq!(scheduler.cancelled, vec![*scheduler.requested.last().unwrap()]);
    assert_eq!(simulator.multiplier(), SpeedMultiplier::X2);
}

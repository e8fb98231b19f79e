//! Headless runs of the follower plugin.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use drift_core::{AttractorTarget, CurveFollower, CurveFollowerPlugin, CurvePath, SceneViewport};

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(CurveFollowerPlugin);
    app
}

#[test]
fn test_missing_target_is_a_no_op() {
    let mut app = headless_app();
    for _ in 0..20 {
        app.update();
    }

    let follower = app.world().resource::<CurveFollower>();
    assert_eq!(follower.offset(), 0.0);
    assert_eq!(follower.last_step(), 0.0);
}

#[test]
fn test_target_follows_curve_and_keeps_z() {
    let mut app = headless_app();
    let target = app
        .world_mut()
        .spawn((AttractorTarget, Transform::from_xyz(0.0, 0.0, 10.0)))
        .id();

    for _ in 0..30 {
        app.update();

        let offset = app.world().resource::<CurveFollower>().offset();
        assert!((0.0..1.0).contains(&offset), "offset {}", offset);

        let expected = app.world().resource::<CurvePath>().0.point_at(offset);
        let translation = app.world().get::<Transform>(target).unwrap().translation;
        assert!((translation.x - expected.x).abs() < 1e-5);
        assert!((translation.y - expected.y).abs() < 1e-5);
        assert_eq!(translation.z, 10.0);
    }
}

#[test]
fn test_every_target_gets_the_same_point() {
    let mut app = headless_app();
    let a = app
        .world_mut()
        .spawn((AttractorTarget, Transform::from_xyz(0.0, 0.0, 1.0)))
        .id();
    let b = app
        .world_mut()
        .spawn((AttractorTarget, Transform::from_xyz(0.0, 0.0, -3.0)))
        .id();

    for _ in 0..5 {
        app.update();
    }

    let pa = app.world().get::<Transform>(a).unwrap().translation;
    let pb = app.world().get::<Transform>(b).unwrap().translation;
    assert_eq!(pa.truncate(), pb.truncate());
    assert_eq!(pa.z, 1.0);
    assert_eq!(pb.z, -3.0);
}

#[test]
fn test_viewport_change_rebuilds_curve() {
    let mut app = headless_app();
    app.update();

    app.insert_resource(SceneViewport::new(4.0, 2.0));
    app.update();

    let curve = &app.world().resource::<CurvePath>().0;
    assert!(curve.point_at(0.0).abs_diff_eq(Vec3::new(4.0, 2.0, 0.0), 1e-5));
    assert!(curve.point_at(0.5).abs_diff_eq(Vec3::new(-4.0, -2.0, 0.0), 1e-5));
}

#[test]
fn test_paused_follower_holds_target() {
    let mut app = headless_app();
    let target = app
        .world_mut()
        .spawn((AttractorTarget, Transform::from_xyz(0.0, 0.0, 10.0)))
        .id();
    app.world_mut().resource_mut::<CurveFollower>().paused = true;

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(app.world().resource::<CurveFollower>().offset(), 0.0);
    let start = app.world().resource::<CurvePath>().0.point_at(0.0);
    let translation = app.world().get::<Transform>(target).unwrap().translation;
    assert!(translation.truncate().abs_diff_eq(start.truncate(), 1e-5));
}

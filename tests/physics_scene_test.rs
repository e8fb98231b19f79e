//! Headless runs of the follower and physics plugins together.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use drift_core::{Attractor, CurveFollowerPlugin, DriftConfig, GlyphBody};
use drift_physics::{BoundsBody, PhysicsPlugin, PhysicsState, ResetGlyphs};

fn scene_app(config: DriftConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .insert_resource(config)
        .add_plugins(CurveFollowerPlugin)
        .add_plugins(PhysicsPlugin);
    app
}

fn glyph_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&GlyphBody>();
    query.iter(world).count()
}

#[test]
fn test_default_scene_spawns_all_groups() {
    let mut app = scene_app(DriftConfig::default());
    app.update();

    assert_eq!(app.world().resource::<PhysicsState>().dynamic_body_count(), 40);
    assert_eq!(glyph_count(&mut app), 40);
    assert!(app.world().resource::<BoundsBody>().0.is_some());
}

#[test]
fn test_reset_replaces_glyphs() {
    let mut config = DriftConfig::default();
    config.glyphs.count_per_letter = 2;
    let mut app = scene_app(config);
    app.update();
    assert_eq!(glyph_count(&mut app), 8);

    app.world_mut().write_message(ResetGlyphs);
    app.update();

    assert_eq!(app.world().resource::<PhysicsState>().dynamic_body_count(), 8);
    assert_eq!(glyph_count(&mut app), 8);
}

#[test]
fn test_attractor_draws_glyph() {
    let mut config = DriftConfig::default();
    config.glyphs.letters = vec!["A".to_string()];
    config.glyphs.count_per_letter = 1;
    let mut app = scene_app(config);
    app.world_mut().spawn((
        Attractor::default(),
        Transform::from_xyz(3.0, 0.0, -0.75),
    ));

    for _ in 0..5 {
        app.update();
    }

    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<GlyphBody>>();
    let glyph = query.single(world).unwrap();
    assert!(glyph.translation.x > 0.0, "glyph at {:?}", glyph.translation);
}

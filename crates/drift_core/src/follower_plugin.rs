//! ECS wiring for the curve follower.
//!
//! Per frame, in [`DriftSet`] order:
//! 1. `Viewport`: refresh [`SceneViewport`] and rebuild [`CurvePath`] if it changed
//! 2. `Follow`: advance the [`CurveFollower`] and move every [`AttractorTarget`]
//! 3. `Physics`: reserved for the physics crate (impulses, step, sync)

use bevy::prelude::*;

use crate::closed_curve::ClosedCurve;
use crate::config::DriftConfig;
use crate::curve_follower::CurveFollower;
use crate::viewport::{track_viewport, SceneViewport};

/// Frame ordering shared by the scene crates.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriftSet {
    Viewport,
    Follow,
    Physics,
}

/// The closed path the attractor travels, sized to the viewport.
#[derive(Resource, Clone, Debug)]
pub struct CurvePath(pub ClosedCurve);

impl CurvePath {
    pub fn for_viewport(viewport: &SceneViewport) -> Self {
        Self(ClosedCurve::rectangle(viewport.width, viewport.height))
    }
}

/// Marks the entity whose x/y the follower drives. Its z is left alone.
#[derive(Component, Default, Debug)]
pub struct AttractorTarget;

/// Plugin that moves [`AttractorTarget`] entities along the curve.
pub struct CurveFollowerPlugin;

impl Plugin for CurveFollowerPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<DriftConfig>()
            .cloned()
            .unwrap_or_default();
        let viewport = SceneViewport::from_config(&config);

        app.insert_resource(config.clone())
            .insert_resource(viewport)
            .insert_resource(CurvePath::for_viewport(&viewport))
            .insert_resource(CurveFollower::from_config(&config.follow))
            .configure_sets(
                Update,
                (DriftSet::Viewport, DriftSet::Follow, DriftSet::Physics).chain(),
            )
            .add_systems(
                Update,
                (
                    track_viewport,
                    rebuild_curve_path.run_if(resource_changed::<SceneViewport>),
                )
                    .chain()
                    .in_set(DriftSet::Viewport),
            )
            .add_systems(Update, drive_attractor.in_set(DriftSet::Follow));
    }
}

/// Rebuild the curve from the current viewport extent.
pub fn rebuild_curve_path(viewport: Res<SceneViewport>, mut path: ResMut<CurvePath>) {
    *path = CurvePath::for_viewport(&viewport);
    info!(
        "Attractor path rebuilt for {:.2} x {:.2}",
        viewport.width, viewport.height
    );
}

/// Advance the follower and write the curve point into the targets' x/y.
///
/// Without a target the frame is skipped entirely and the offset holds.
pub fn drive_attractor(
    time: Res<Time>,
    path: Res<CurvePath>,
    mut follower: ResMut<CurveFollower>,
    mut targets: Query<&mut Transform, With<AttractorTarget>>,
) {
    if targets.is_empty() {
        return;
    }

    let point = follower.tick(time.elapsed_secs(), &path.0);
    for mut transform in &mut targets {
        transform.translation.x = point.x;
        transform.translation.y = point.y;
    }
}

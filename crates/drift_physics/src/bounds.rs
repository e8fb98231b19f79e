//! Invisible box that keeps the glyphs inside the view.
//!
//! One fixed body carries six cuboid colliders (back, front, right, left,
//! top, bottom). The body is replaced whenever the viewport extent changes.

use bevy::prelude::*;
use drift_core::{BoundsConfig, DriftConfig, SceneViewport};
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

use crate::PhysicsState;

/// Handle of the current wall body, if built.
#[derive(Resource, Default)]
pub struct BoundsBody(pub Option<rapier::RigidBodyHandle>);

/// Placement of a single wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSpec {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl WallSpec {
    fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }
}

/// The six walls for a viewport: back, front, right, left, top, bottom.
pub fn wall_specs(viewport: &SceneViewport, bounds: &BoundsConfig) -> [WallSpec; 6] {
    let w = viewport.width;
    let h = viewport.height;
    let t = bounds.wall_thickness;
    let side_depth = bounds.depth() + t * 0.5;
    let mid_z = (bounds.back_z + bounds.front_z) * 0.5;
    let side_x = w / 2.0 + bounds.wall_offset;
    let side_y = h / 2.0 + bounds.wall_offset;

    [
        WallSpec::new(Vec3::new(0.0, 0.0, bounds.back_z), Vec3::new(w, h, t)),
        WallSpec::new(Vec3::new(0.0, 0.0, bounds.front_z), Vec3::new(w, h, t)),
        WallSpec::new(Vec3::new(side_x, 0.0, mid_z), Vec3::new(t, h, side_depth)),
        WallSpec::new(Vec3::new(-side_x, 0.0, mid_z), Vec3::new(t, h, side_depth)),
        WallSpec::new(Vec3::new(0.0, side_y, mid_z), Vec3::new(w, t, side_depth)),
        WallSpec::new(Vec3::new(0.0, -side_y, mid_z), Vec3::new(w, t, side_depth)),
    ]
}

/// Replace the wall body with one sized to the current viewport.
pub fn rebuild_bounds(
    config: Res<DriftConfig>,
    viewport: Res<SceneViewport>,
    mut physics: ResMut<PhysicsState>,
    mut bounds: ResMut<BoundsBody>,
) {
    let p = physics.as_mut();

    if let Some(old) = bounds.0.take() {
        p.remove_body(old);
    }

    let handle = p.rigid_body_set.insert(rapier::RigidBodyBuilder::fixed());
    for wall in wall_specs(&viewport, &config.bounds) {
        let half = wall.half_extents;
        let collider = rapier::ColliderBuilder::cuboid(half.x, half.y, half.z)
            .translation(Vector3::new(wall.center.x, wall.center.y, wall.center.z));
        p.collider_set
            .insert_with_parent(collider, handle, &mut p.rigid_body_set);
    }
    bounds.0 = Some(handle);

    info!(
        "Bounds rebuilt for {:.2} x {:.2} viewport",
        viewport.width, viewport.height
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_walls_match_scene_box() {
        let viewport = SceneViewport::new(10.0, 6.0);
        let walls = wall_specs(&viewport, &BoundsConfig::default());

        assert_eq!(walls[0].center, Vec3::new(0.0, 0.0, -46.0));
        assert_eq!(walls[0].half_extents, Vec3::new(5.0, 3.0, 1.0));
        assert_eq!(walls[1].center, Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(walls[2].center.x, 5.5);
        assert_eq!(walls[3].center.x, -5.5);
        assert_eq!(walls[4].center.y, 3.5);
        assert_eq!(walls[5].center.y, -3.5);
    }

    #[test]
    fn test_side_walls_span_back_to_front() {
        let bounds = BoundsConfig::default();
        let walls = wall_specs(&SceneViewport::new(10.0, 6.0), &bounds);
        for wall in &walls[2..] {
            let near = wall.center.z + wall.half_extents.z;
            let far = wall.center.z - wall.half_extents.z;
            assert!(near >= bounds.front_z, "{:?}", wall);
            assert!(far <= bounds.back_z, "{:?}", wall);
        }
    }

    #[test]
    fn test_rebuild_replaces_body() {
        let mut app = App::new();
        app.init_resource::<DriftConfig>()
            .insert_resource(SceneViewport::new(10.0, 6.0))
            .init_resource::<PhysicsState>()
            .init_resource::<BoundsBody>()
            .add_systems(Update, rebuild_bounds);

        app.update();
        let first = app.world().resource::<BoundsBody>().0;
        assert!(first.is_some());

        app.update();
        let physics = app.world().resource::<PhysicsState>();
        assert_eq!(physics.rigid_body_set.len(), 1);
        assert_eq!(physics.collider_set.len(), 6);
        assert_ne!(app.world().resource::<BoundsBody>().0, first);
    }
}

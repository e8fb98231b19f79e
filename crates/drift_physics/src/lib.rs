use bevy::prelude::*;
use drift_core::{Attractor, DriftConfig, DriftSet, SceneViewport};
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

pub mod bounds;
pub mod glyph_bodies;

pub use bounds::{rebuild_bounds, wall_specs, BoundsBody, WallSpec};
pub use glyph_bodies::{
    despawn_glyph_bodies, glyph_spawn_positions, reset_glyphs, spawn_glyph_bodies,
    spawn_initial_glyphs, ResetGlyphs,
};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DriftConfig>()
            .init_resource::<SceneViewport>()
            .insert_resource(PhysicsState::new())
            .init_resource::<BoundsBody>()
            .add_message::<ResetGlyphs>()
            .add_systems(Startup, spawn_initial_glyphs)
            .add_systems(
                Update,
                (
                    rebuild_bounds.run_if(resource_changed::<SceneViewport>),
                    reset_glyphs,
                    apply_attractor_impulses,
                    step_physics,
                    sync_transforms,
                )
                    .chain()
                    .in_set(DriftSet::Physics),
            );
    }
}

#[derive(Resource)]
pub struct PhysicsState {
    pub gravity: Vector3<f32>,
    pub integration_parameters: rapier::IntegrationParameters,
    pub physics_pipeline: rapier::PhysicsPipeline,
    pub island_manager: rapier::IslandManager,
    pub broad_phase: rapier::DefaultBroadPhase,
    pub narrow_phase: rapier::NarrowPhase,
    pub rigid_body_set: rapier::RigidBodySet,
    pub collider_set: rapier::ColliderSet,
    pub impulse_joint_set: rapier::ImpulseJointSet,
    pub multibody_joint_set: rapier::MultibodyJointSet,
    pub ccd_solver: rapier::CCDSolver,
}

impl PhysicsState {
    /// Weightless world: only the attractor moves the glyphs.
    pub fn new() -> Self {
        Self {
            gravity: Vector3::zeros(),
            integration_parameters: rapier::IntegrationParameters::default(),
            physics_pipeline: rapier::PhysicsPipeline::new(),
            island_manager: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            rigid_body_set: rapier::RigidBodySet::new(),
            collider_set: rapier::ColliderSet::new(),
            impulse_joint_set: rapier::ImpulseJointSet::new(),
            multibody_joint_set: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
        }
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count()
    }

    /// Remove a body together with its colliders and joints.
    pub fn remove_body(&mut self, handle: rapier::RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Links a Bevy entity to a Rapier rigid body
#[derive(Component)]
pub struct RigidBodyLink(pub rapier::RigidBodyHandle);

/// Pull every dynamic body toward each attractor in range.
pub fn apply_attractor_impulses(
    mut physics: ResMut<PhysicsState>,
    attractors: Query<(&Attractor, &Transform)>,
) {
    if attractors.is_empty() {
        return;
    }

    for (_, body) in physics.rigid_body_set.iter_mut() {
        if !body.is_dynamic() {
            continue;
        }

        let pos = body.translation();
        let position = Vec3::new(pos.x, pos.y, pos.z);
        let mass = body.mass();

        let total = attractors
            .iter()
            .filter_map(|(attractor, transform)| {
                attractor.impulse_on(transform.translation, position, mass)
            })
            .fold(Vec3::ZERO, |acc, impulse| acc + impulse);

        if total != Vec3::ZERO {
            body.apply_impulse(Vector3::new(total.x, total.y, total.z), true);
        }
    }
}

fn step_physics(mut physics: ResMut<PhysicsState>) {
    let p = physics.as_mut();
    p.physics_pipeline.step(
        &p.gravity,
        &p.integration_parameters,
        &mut p.island_manager,
        &mut p.broad_phase,
        &mut p.narrow_phase,
        &mut p.rigid_body_set,
        &mut p.collider_set,
        &mut p.impulse_joint_set,
        &mut p.multibody_joint_set,
        &mut p.ccd_solver,
        None,
        &(),
        &(),
    );
}

fn sync_transforms(physics: Res<PhysicsState>, mut query: Query<(&RigidBodyLink, &mut Transform)>) {
    for (link, mut transform) in query.iter_mut() {
        if let Some(body) = physics.rigid_body_set.get(link.0) {
            let pos = body.translation();
            let rot = body.rotation();
            transform.translation = Vec3::new(pos.x, pos.y, pos.z);
            transform.rotation = Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w);
        }
    }
}

//! Dynamic letter bodies.
//!
//! Each configured letter becomes a group of bodies stacked along -z. The
//! entity only carries [`GlyphBody`], a [`Transform`] and the
//! [`RigidBodyLink`]; the render side attaches meshes.

use bevy::prelude::*;
use drift_core::{DriftConfig, GlyphBody, GlyphConfig, GlyphShape};
use rand::Rng;
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

use crate::{PhysicsState, RigidBodyLink};

/// Request to remove every glyph body and spawn a fresh set.
#[derive(Message, Default, Clone, Copy)]
pub struct ResetGlyphs;

/// Spawn positions for one letter group.
pub fn glyph_spawn_positions(config: &GlyphConfig) -> Vec<Vec3> {
    let origin = Vec3::from_array(config.origin);
    (0..config.count_per_letter)
        .map(|i| origin - Vec3::Z * (i as f32 * config.row_depth))
        .collect()
}

/// Create bodies and entities for every configured letter group.
///
/// Returns the number of bodies spawned.
pub fn spawn_glyph_bodies(
    commands: &mut Commands,
    physics: &mut PhysicsState,
    config: &GlyphConfig,
) -> usize {
    let letters = match config.letter_chars() {
        Ok(letters) => letters,
        Err(e) => {
            warn!("No glyph bodies spawned: {}", e);
            return 0;
        }
    };

    let mut rng = rand::thread_rng();
    let positions = glyph_spawn_positions(config);
    let mut spawned = 0;

    for (group, letter) in letters.into_iter().enumerate() {
        let shape = match GlyphShape::new(letter, config.size, config.depth) {
            Ok(shape) => shape,
            Err(e) => {
                warn!("Skipping glyph group {}: {}", group, e);
                continue;
            }
        };
        let half = shape.half_extents();

        for position in &positions {
            let density = if config.density_max > config.density_min {
                rng.gen_range(config.density_min..config.density_max)
            } else {
                config.density_min
            };

            let body = rapier::RigidBodyBuilder::dynamic()
                .translation(Vector3::new(position.x, position.y, position.z))
                .linear_damping(config.linear_damping)
                .angular_damping(config.angular_damping);
            let handle = physics.rigid_body_set.insert(body);
            let collider = rapier::ColliderBuilder::cuboid(half.x, half.y, half.z).density(density);
            physics
                .collider_set
                .insert_with_parent(collider, handle, &mut physics.rigid_body_set);

            commands.spawn((
                GlyphBody { letter, group },
                Transform::from_translation(*position),
                RigidBodyLink(handle),
            ));
            spawned += 1;
        }
    }

    spawned
}

/// Remove every glyph body from the world and despawn its entity.
pub fn despawn_glyph_bodies(
    commands: &mut Commands,
    physics: &mut PhysicsState,
    bodies: &Query<(Entity, &RigidBodyLink), With<GlyphBody>>,
) -> usize {
    let mut removed = 0;
    for (entity, link) in bodies.iter() {
        physics.remove_body(link.0);
        commands.entity(entity).despawn();
        removed += 1;
    }
    removed
}

pub fn spawn_initial_glyphs(
    mut commands: Commands,
    config: Res<DriftConfig>,
    mut physics: ResMut<PhysicsState>,
) {
    let count = spawn_glyph_bodies(&mut commands, &mut physics, &config.glyphs);
    info!("Spawned {} glyph bodies", count);
}

pub fn reset_glyphs(
    mut commands: Commands,
    mut events: MessageReader<ResetGlyphs>,
    config: Res<DriftConfig>,
    mut physics: ResMut<PhysicsState>,
    bodies: Query<(Entity, &RigidBodyLink), With<GlyphBody>>,
) {
    // several requests in one frame collapse into one reset
    if events.read().count() == 0 {
        return;
    }

    let removed = despawn_glyph_bodies(&mut commands, &mut physics, &bodies);
    let spawned = spawn_glyph_bodies(&mut commands, &mut physics, &config.glyphs);
    info!("Reset glyphs: removed {}, spawned {}", removed, spawned);
}

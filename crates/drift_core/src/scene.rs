//! Render side of the glyph scene: camera, lights, attractor entity, glyph
//! visuals and the debug path line.
//!
//! Glyph bodies are spawned by the physics crate with a [`GlyphBody`]
//! marker only; [`attach_glyph_visuals`] gives them a mesh and the shared
//! glass material once the assets exist.

use bevy::color::palettes::css::RED;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::DriftConfig;
use crate::follower_plugin::{AttractorTarget, CurvePath, DriftSet};
use crate::force_field::Attractor;
use crate::glyph::{GlyphBody, GlyphShape};
use crate::orbit_camera::OrbitCameraBundle;
use crate::viewport::SceneViewport;

/// Plugin that spawns everything the player sees.
pub struct GlyphScenePlugin;

impl Plugin for GlyphScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (load_glyph_assets, setup_scene))
            .add_systems(
                Update,
                (
                    place_scene_light.run_if(resource_changed::<SceneViewport>),
                    attach_glyph_visuals,
                    draw_curve_gizmo,
                )
                    .after(DriftSet::Follow),
            );
    }
}

/// Marker for the point light that tracks the viewport corner.
#[derive(Component)]
pub struct SceneLight;

/// Meshes per letter plus the shared glass material.
#[derive(Resource, Default)]
pub struct GlyphAssets {
    pub meshes: HashMap<char, Handle<Mesh>>,
    pub material: Handle<StandardMaterial>,
}

/// Clear, glassy material standing in for a transmission shader.
pub fn glass_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.08,
        metallic: 0.0,
        reflectance: 0.5,
        specular_transmission: 0.95,
        thickness: 3.0,
        ior: 1.45,
        attenuation_distance: 6.0,
        attenuation_color: Color::srgb(0.85, 0.9, 1.0),
        clearcoat: 1.0,
        clearcoat_perceptual_roughness: 0.05,
        ..default()
    }
}

/// Where the point light sits for a given viewport.
pub fn scene_light_position(viewport: &SceneViewport, z: f32) -> Vec3 {
    Vec3::new(viewport.width, viewport.height / 2.0, z)
}

/// Where the attractor starts before the follower takes over.
pub fn attractor_start_position(viewport: &SceneViewport, z: f32) -> Vec3 {
    Vec3::new(0.0, -viewport.height, z)
}

fn load_glyph_assets(
    mut commands: Commands,
    config: Res<DriftConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut assets = GlyphAssets {
        meshes: HashMap::new(),
        material: materials.add(glass_material()),
    };

    let letters = match config.glyphs.letter_chars() {
        Ok(letters) => letters,
        Err(e) => {
            warn!("No glyph meshes built: {}", e);
            Vec::new()
        }
    };

    for letter in letters {
        if assets.meshes.contains_key(&letter) {
            continue;
        }
        match GlyphShape::new(letter, config.glyphs.size, config.glyphs.depth) {
            Ok(shape) => {
                assets.meshes.insert(letter, meshes.add(shape.mesh()));
            }
            Err(e) => warn!("Skipping glyph mesh: {}", e),
        }
    }

    info!("Built {} glyph meshes", assets.meshes.len());
    commands.insert_resource(assets);
}

fn setup_scene(mut commands: Commands, config: Res<DriftConfig>, viewport: Res<SceneViewport>) {
    commands.spawn((
        OrbitCameraBundle::new(config.camera.distance, config.camera.zoom, Vec3::ZERO),
        AmbientLight {
            brightness: config.lighting.ambient_brightness,
            ..default()
        },
    ));

    commands.spawn((
        PointLight {
            intensity: config.lighting.point_intensity,
            range: config.lighting.point_range,
            shadows_enabled: config.lighting.shadows,
            ..default()
        },
        Transform::from_translation(scene_light_position(&viewport, config.lighting.point_z)),
        SceneLight,
    ));

    commands.spawn((
        Name::new("Attractor"),
        Attractor::from_config(&config.attractor),
        AttractorTarget,
        Transform::from_translation(attractor_start_position(&viewport, config.attractor.z)),
    ));
}

fn place_scene_light(
    config: Res<DriftConfig>,
    viewport: Res<SceneViewport>,
    mut lights: Query<&mut Transform, With<SceneLight>>,
) {
    for mut transform in &mut lights {
        transform.translation = scene_light_position(&viewport, config.lighting.point_z);
    }
}

/// Give freshly spawned glyph bodies their mesh and material.
pub fn attach_glyph_visuals(
    mut commands: Commands,
    assets: Option<Res<GlyphAssets>>,
    bodies: Query<(Entity, &GlyphBody), Without<Mesh3d>>,
) {
    let Some(assets) = assets else {
        return;
    };

    for (entity, body) in &bodies {
        let Some(mesh) = assets.meshes.get(&body.letter) else {
            continue;
        };
        commands.entity(entity).insert((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }
}

fn draw_curve_gizmo(config: Res<DriftConfig>, path: Res<CurvePath>, mut gizmos: Gizmos) {
    if !config.debug.show_curve {
        return;
    }
    gizmos.linestrip(path.0.sample_points(config.debug.curve_divisions), RED);
}

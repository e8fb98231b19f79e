//! Core types and systems for the glyph drift scene.
//!
//! This crate provides:
//! - Closed Catmull-Rom curve sized to the viewport
//! - Noise-driven curve follower that steers the attractor
//! - Attractor force math shared with the physics crate
//! - Stroke-built letter meshes and collider bounds
//! - Orthographic orbit camera
//! - Scene configuration (defaults + optional JSON overrides)

use bevy::prelude::*;

pub mod closed_curve;
pub mod config;
pub mod curve_follower;
pub mod follower_plugin;
pub mod force_field;
pub mod glyph;
pub mod noise_field;
pub mod orbit_camera;
pub mod scene;
pub mod viewport;

pub use closed_curve::{ClosedCurve, CurveError, CurveKind};
pub use config::{
    AttractorConfig, BoundsConfig, CameraConfig, ConfigError, ConfigResult, DebugConfig,
    DriftConfig, FollowConfig, GlyphConfig, LightingConfig,
};
pub use curve_follower::{wrap_offset, CurveFollower};
pub use follower_plugin::{
    drive_attractor, rebuild_curve_path, AttractorTarget, CurveFollowerPlugin, CurvePath,
    DriftSet,
};
pub use force_field::{Attractor, AttractorKind};
pub use glyph::{glyph_outline, GlyphBody, GlyphError, GlyphOutline, GlyphShape, Stroke};
pub use noise_field::{ConstantNoiseField, NoiseField, SimplexNoiseField, DEFAULT_NOISE_SEED};
pub use orbit_camera::{OrbitCamera, OrbitCameraBundle, OrbitCameraPlugin};
pub use scene::{glass_material, GlyphAssets, GlyphScenePlugin, SceneLight};
pub use viewport::{track_viewport, SceneViewport};

/// Core plugin: follower, scene and camera controls.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CurveFollowerPlugin)
            .add_plugins(GlyphScenePlugin)
            .add_plugins(OrbitCameraPlugin);
    }
}

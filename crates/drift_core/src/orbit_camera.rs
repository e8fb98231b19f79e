//! Orthographic orbit camera for the glyph scene.
//!
//! Rotates around a target point while keeping an orthographic projection.
//! - Left mouse drag: rotate camera (azimuth and elevation)
//! - Scroll wheel: zoom (pixels per world unit)
//!
//! Zooming changes the projection scale, which in turn changes the
//! [`SceneViewport`](crate::SceneViewport) extent the curve is built from.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

#[derive(Component)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (radians)
    pub azimuth: f32,
    /// Vertical angle (radians), clamped to avoid gimbal lock
    pub elevation: f32,
    /// Mouse sensitivity for rotation
    pub sensitivity: f32,
    /// Pixels per world unit
    pub zoom: f32,
    /// Fraction of zoom added per scroll line
    pub zoom_sensitivity: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 100.0,
            azimuth: 0.0,
            elevation: 0.0, // looking straight down -Z
            sensitivity: 0.005,
            zoom: 102.0,
            zoom_sensitivity: 0.1,
            min_zoom: 10.0,
            max_zoom: 1000.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, zoom: f32) -> Self {
        Self {
            distance,
            zoom,
            ..default()
        }
    }

    /// Set the target point to orbit around.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Calculate the camera position based on current orbit parameters.
    pub fn calculate_position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Apply `lines` of scroll to the zoom, multiplicatively.
    pub fn apply_scroll(&mut self, lines: f32) {
        let factor = (1.0 + self.zoom_sensitivity).powf(lines);
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Orthographic projection for the current zoom.
    pub fn projection(&self) -> Projection {
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / self.zoom,
            ..OrthographicProjection::default_3d()
        })
    }
}

/// System that updates orbit camera based on mouse input.
pub fn orbit_camera_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut OrbitCamera, &mut Transform, &mut Projection)>,
) {
    for (mut orbit, mut transform, mut projection) in query.iter_mut() {
        if mouse_button.pressed(MouseButton::Left) {
            let delta = mouse_motion.delta;
            orbit.azimuth -= delta.x * orbit.sensitivity;
            orbit.elevation += delta.y * orbit.sensitivity;
            orbit.elevation = orbit.elevation.clamp(-1.4, 1.4); // ~80 degrees
        }

        let scroll = mouse_scroll.delta.y;
        if scroll != 0.0 {
            orbit.apply_scroll(scroll);
            if let Projection::Orthographic(ortho) = &mut *projection {
                ortho.scale = 1.0 / orbit.zoom;
            }
        }

        let position = orbit.calculate_position();
        transform.translation = position;
        transform.look_at(orbit.target, Vec3::Y);
    }
}

/// Plugin that adds orbit camera functionality.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, orbit_camera_system);
    }
}

/// Bundle for spawning an orthographic orbit camera.
#[derive(Bundle)]
pub struct OrbitCameraBundle {
    pub camera: Camera3d,
    pub projection: Projection,
    pub orbit: OrbitCamera,
    pub transform: Transform,
}

impl OrbitCameraBundle {
    pub fn new(distance: f32, zoom: f32, target: Vec3) -> Self {
        let orbit = OrbitCamera::new(distance, zoom).with_target(target);
        let position = orbit.calculate_position();
        Self {
            camera: Camera3d::default(),
            projection: orbit.projection(),
            orbit,
            transform: Transform::from_translation(position).looking_at(target, Vec3::Y),
        }
    }
}

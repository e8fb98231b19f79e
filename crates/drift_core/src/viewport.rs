//! World-space extent of the orthographic view.
//!
//! The curve, the walls and the light are all sized from this resource.
//! It only registers as changed when the extent really changes (window
//! resize or camera zoom), so dependants can rebuild on
//! `resource_changed::<SceneViewport>`.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::DriftConfig;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SceneViewport {
    pub width: f32,
    pub height: f32,
}

impl SceneViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent of a window of `window_size` pixels at `zoom` pixels per unit.
    pub fn from_window(window_size: Vec2, zoom: f32) -> Self {
        Self::new(window_size.x / zoom, window_size.y / zoom)
    }

    /// Extent used until a window reports its size.
    pub fn from_config(config: &DriftConfig) -> Self {
        let [w, h] = config.camera.fallback_window;
        Self::from_window(Vec2::new(w, h), config.camera.zoom)
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for SceneViewport {
    fn default() -> Self {
        Self::from_config(&DriftConfig::default())
    }
}

/// Recompute the viewport from the primary window and the orthographic
/// camera's scale. Minimised windows (zero size) keep the last extent.
pub fn track_viewport(
    config: Res<DriftConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    projections: Query<&Projection, With<Camera3d>>,
    mut viewport: ResMut<SceneViewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let scale = projections
        .iter()
        .find_map(|projection| match projection {
            Projection::Orthographic(ortho) => Some(ortho.scale),
            _ => None,
        })
        .unwrap_or(1.0 / config.camera.zoom);

    let next = SceneViewport::new(window.width() * scale, window.height() * scale);
    if next.is_valid() && viewport.set_if_neq(next) {
        debug!("Viewport extent now {:.2} x {:.2}", next.width, next.height);
    }
}

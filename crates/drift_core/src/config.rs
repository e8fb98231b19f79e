//! Scene configuration.
//!
//! Every tuning constant of the scene lives here with its default. A JSON
//! file may override any subset of fields:
//!
//! ```json
//! {
//!   "follow": { "time_scale": 30.0 },
//!   "glyphs": { "letters": ["A", "K", "Q"], "count_per_letter": 6 }
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::force_field::AttractorKind;
use crate::glyph::glyph_outline;
use crate::noise_field::DEFAULT_NOISE_SEED;

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// File system error
    Io(std::io::Error),
    /// Malformed JSON or wrong field types
    Json(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Curve-follower tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Elapsed time is divided by this before sampling noise.
    pub time_scale: f32,
    /// Noise samples are divided by this to get the per-frame step.
    pub step_divisor: f32,
    /// Permutation seed for the noise field.
    pub noise_seed: u32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            time_scale: 20.0,
            step_divisor: 300.0,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

/// Attractor pulling the glyphs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractorConfig {
    pub strength: f32,
    /// Bodies farther than this are unaffected.
    pub range: f32,
    pub kind: AttractorKind,
    /// Only used by [`AttractorKind::Newtonian`].
    pub gravitational_constant: f32,
    /// Fixed depth of the attractor; the follower only moves x and y.
    pub z: f32,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            strength: 200.0,
            range: 200.0,
            kind: AttractorKind::Static,
            gravitational_constant: 6.673e-11,
            z: 10.0,
        }
    }
}

/// Letter bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// One instanced group per entry; repeats are allowed.
    pub letters: Vec<String>,
    pub count_per_letter: usize,
    /// Cap height of a glyph.
    pub size: f32,
    /// Extrusion depth.
    pub depth: f32,
    /// Spawn position of the first body in each group.
    pub origin: [f32; 3],
    /// Spacing along -z between bodies of a group.
    pub row_depth: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub density_min: f32,
    pub density_max: f32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        let row_depth = 0.15;
        Self {
            letters: ["A", "K", "Q", "A"].iter().map(|s| s.to_string()).collect(),
            count_per_letter: 10,
            size: 1.0,
            depth: 0.5,
            origin: [0.0, 0.0, -row_depth * 5.0],
            row_depth,
            linear_damping: 10.0,
            angular_damping: 10.0,
            density_min: 60.0,
            density_max: 120.0,
        }
    }
}

impl GlyphConfig {
    /// Letters as chars. Entries must be a single character.
    pub fn letter_chars(&self) -> ConfigResult<Vec<char>> {
        self.letters
            .iter()
            .map(|s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConfigError::Invalid(format!(
                        "glyph letter {:?} must be exactly one character",
                        s
                    ))),
                }
            })
            .collect()
    }
}

/// Invisible walls that keep the glyphs on screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Centre of the back wall.
    pub back_z: f32,
    /// Centre of the front wall (just in front of the glyphs).
    pub front_z: f32,
    pub wall_thickness: f32,
    /// Distance from the viewport edge out to a side wall's centre.
    pub wall_offset: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            back_z: -46.0,
            front_z: 0.5,
            wall_thickness: 2.0,
            wall_offset: 0.5,
        }
    }
}

impl BoundsConfig {
    /// Depth between back and front walls.
    pub fn depth(&self) -> f32 {
        self.front_z - self.back_z
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Pixels per world unit of the orthographic projection.
    pub zoom: f32,
    /// Distance of the camera from the origin along +z.
    pub distance: f32,
    /// Extent used before a window reports its size (or without one).
    pub fallback_window: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 102.0,
            distance: 100.0,
            fallback_window: [1280.0, 720.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    /// Point light intensity in lumens.
    pub point_intensity: f32,
    pub point_range: f32,
    pub point_z: f32,
    pub shadows: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 400.0,
            point_intensity: 4_000_000.0,
            point_range: 200.0,
            point_z: 10.0,
            shadows: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw the attractor path.
    pub show_curve: bool,
    /// Number of spans in the debug line.
    pub curve_divisions: usize,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_curve: true,
            curve_divisions: 50,
        }
    }
}

/// Top-level scene configuration.
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub follow: FollowConfig,
    pub attractor: AttractorConfig,
    pub glyphs: GlyphConfig,
    pub bounds: BoundsConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub debug: DebugConfig,
}

impl DriftConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        info!("Loaded scene config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: DriftConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that would otherwise produce NaNs or empty scenes.
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(name: &str, value: f32) -> ConfigResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("follow.time_scale", self.follow.time_scale)?;
        positive("follow.step_divisor", self.follow.step_divisor)?;
        positive("attractor.range", self.attractor.range)?;
        positive("glyphs.size", self.glyphs.size)?;
        positive("glyphs.depth", self.glyphs.depth)?;
        positive("glyphs.density_min", self.glyphs.density_min)?;
        positive("bounds.wall_thickness", self.bounds.wall_thickness)?;
        positive("bounds depth", self.bounds.depth())?;
        positive("camera.zoom", self.camera.zoom)?;
        positive("camera.fallback_window width", self.camera.fallback_window[0])?;
        positive("camera.fallback_window height", self.camera.fallback_window[1])?;

        if self.glyphs.density_max < self.glyphs.density_min {
            return Err(ConfigError::Invalid(format!(
                "glyphs.density_max ({}) is below density_min ({})",
                self.glyphs.density_max, self.glyphs.density_min
            )));
        }
        if self.glyphs.letters.is_empty() {
            return Err(ConfigError::Invalid("glyphs.letters is empty".into()));
        }
        for c in self.glyphs.letter_chars()? {
            glyph_outline(c).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        Ok(())
    }
}

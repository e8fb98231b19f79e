//! Point attractor applied to nearby dynamic bodies.
//!
//! Pure math lives here so it can be tested without a physics world; the
//! physics crate feeds body positions and masses through
//! [`Attractor::impulse_on`] every step.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AttractorConfig;

/// Distances below this are treated as "on top of the attractor" and get
/// no impulse (the direction is undefined).
const MIN_DISTANCE: f32 = 1e-6;

/// Falloff of the attractor's pull.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttractorKind {
    /// Same pull everywhere inside the range.
    #[default]
    Static,
    /// Pull grows linearly with distance, reaching `strength` at `range`.
    Linear,
    /// `G * strength * mass / d^2`.
    Newtonian,
}

/// A force field centred on the entity's translation.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Attractor {
    pub strength: f32,
    pub range: f32,
    pub kind: AttractorKind,
    pub gravitational_constant: f32,
}

impl Default for Attractor {
    fn default() -> Self {
        Self::from_config(&AttractorConfig::default())
    }
}

impl Attractor {
    pub fn from_config(config: &AttractorConfig) -> Self {
        Self {
            strength: config.strength,
            range: config.range,
            kind: config.kind,
            gravitational_constant: config.gravitational_constant,
        }
    }

    /// Impulse magnitude for a body of `mass` at `distance`.
    pub fn magnitude(&self, mass: f32, distance: f32) -> f32 {
        let magnitude = match self.kind {
            AttractorKind::Static => self.strength,
            AttractorKind::Linear => self.strength * (distance / self.range),
            AttractorKind::Newtonian => {
                self.gravitational_constant * self.strength * mass / (distance * distance)
            }
        };
        if magnitude.is_finite() {
            magnitude
        } else {
            self.strength
        }
    }

    /// Impulse to apply to a body at `body_position`, or `None` when the
    /// body is out of range or sits exactly on the attractor.
    pub fn impulse_on(
        &self,
        attractor_position: Vec3,
        body_position: Vec3,
        mass: f32,
    ) -> Option<Vec3> {
        let offset = attractor_position - body_position;
        let distance = offset.length();
        if distance >= self.range || distance < MIN_DISTANCE {
            return None;
        }
        Some(offset / distance * self.magnitude(mass, distance))
    }
}

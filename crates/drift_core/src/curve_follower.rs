//! Curve-follower driver.
//!
//! Holds a scalar offset in `[0, 1)` along a [`ClosedCurve`] and nudges it
//! every frame by a step sampled from a [`NoiseField`]:
//!
//! ```text
//! step   = noise(t / time_scale, t / time_scale) / step_divisor
//! offset = wrap(offset + step)
//! target = curve.point_at(offset)
//! ```
//!
//! Sampling the noise along its diagonal at slowly advancing coordinates
//! gives a step that drifts in speed and direction without jitter.

use bevy::prelude::*;

use crate::closed_curve::ClosedCurve;
use crate::config::FollowConfig;
use crate::noise_field::{NoiseField, SimplexNoiseField};

/// Wrap a curve parameter back into `[0, 1)`.
///
/// Steps are expected to be small, so a single add/subtract of one covers
/// the normal case. Anything further out is reduced with a Euclidean
/// remainder. Non-finite input resets to 0.
pub fn wrap_offset(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }

    let mut wrapped = value;
    if wrapped < 0.0 {
        wrapped += 1.0;
    } else if wrapped >= 1.0 {
        wrapped -= 1.0;
    }

    if !(0.0..1.0).contains(&wrapped) {
        wrapped = wrapped.rem_euclid(1.0);
    }
    // rem_euclid can round up to exactly 1.0 for tiny negatives
    if wrapped >= 1.0 {
        wrapped = 0.0;
    }
    wrapped
}

/// Drives a point around a closed curve with noise-perturbed steps.
#[derive(Resource)]
pub struct CurveFollower {
    offset: f32,
    last_step: f32,
    time_scale: f32,
    step_divisor: f32,
    /// When set, ticks leave the offset where it is.
    pub paused: bool,
    noise: Box<dyn NoiseField>,
}

impl CurveFollower {
    pub fn new(noise: impl NoiseField + 'static, config: &FollowConfig) -> Self {
        Self {
            offset: 0.0,
            last_step: 0.0,
            time_scale: config.time_scale,
            step_divisor: config.step_divisor,
            paused: false,
            noise: Box::new(noise),
        }
    }

    /// Follower with simplex noise seeded from the config.
    pub fn from_config(config: &FollowConfig) -> Self {
        Self::new(SimplexNoiseField::new(config.noise_seed), config)
    }

    /// Start from a given offset instead of 0.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = wrap_offset(offset);
        self
    }

    /// Current position along the curve, in `[0, 1)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Step applied on the most recent tick.
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    /// Step size for elapsed time `elapsed` (seconds). Pure.
    pub fn step_size(&self, elapsed: f32) -> f32 {
        let coord = (elapsed / self.time_scale) as f64;
        (self.noise.sample(coord, coord) / self.step_divisor as f64) as f32
    }

    /// Advance the offset for this frame and return it.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        if self.paused {
            self.last_step = 0.0;
            return self.offset;
        }

        let step = self.step_size(elapsed);
        if !step.is_finite() {
            warn!("Ignoring non-finite follower step at t={}", elapsed);
            self.last_step = 0.0;
            return self.offset;
        }

        self.last_step = step;
        self.offset = wrap_offset(self.offset + step);
        self.offset
    }

    /// Advance and evaluate the curve at the new offset.
    pub fn tick(&mut self, elapsed: f32, curve: &ClosedCurve) -> Vec3 {
        let offset = self.advance(elapsed);
        curve.point_at(offset)
    }
}

impl Default for CurveFollower {
    fn default() -> Self {
        Self::from_config(&FollowConfig::default())
    }
}

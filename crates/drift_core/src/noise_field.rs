//! Smooth 2D noise used to perturb the follower's step size.

use noise::{NoiseFn, Simplex};

/// Default seed for the scene's noise field.
pub const DEFAULT_NOISE_SEED: u32 = 0x5EED;

/// A deterministic, spatially smooth scalar field over the plane.
///
/// Implementations must return the same value for the same `(x, y)` and
/// stay within `[-1, 1]`.
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// 2D simplex noise with a fixed permutation seed.
#[derive(Clone, Debug)]
pub struct SimplexNoiseField {
    seed: u32,
    simplex: Simplex,
}

impl SimplexNoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SimplexNoiseField {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl NoiseField for SimplexNoiseField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x, y]).clamp(-1.0, 1.0)
    }
}

/// Noise field that always returns the same value. Handy for pinning the
/// follower's step in tests and demos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoiseField(pub f64);

impl NoiseField for ConstantNoiseField {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_is_deterministic() {
        let a = SimplexNoiseField::new(7);
        let b = SimplexNoiseField::new(7);
        for i in 0..100 {
            let t = i as f64 * 0.173;
            assert_eq!(a.sample(t, t), b.sample(t, t));
            assert_eq!(a.sample(t, t), a.sample(t, t));
        }
    }

    #[test]
    fn test_simplex_range() {
        let field = SimplexNoiseField::default();
        for i in 0..1000 {
            let x = i as f64 * 0.037 - 10.0;
            let v = field.sample(x, x * 0.5);
            assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_simplex_is_smooth_for_small_steps() {
        let field = SimplexNoiseField::default();
        // One frame at 60fps advances the diagonal by (1/60)/20.
        let dt = (1.0 / 60.0) / 20.0;
        for i in 0..500 {
            let t = i as f64 * dt;
            let delta = (field.sample(t + dt, t + dt) - field.sample(t, t)).abs();
            assert!(delta < 0.05, "jump of {} at t={}", delta, t);
        }
    }

    #[test]
    fn test_seed_is_kept() {
        assert_eq!(SimplexNoiseField::new(42).seed(), 42);
        assert_eq!(SimplexNoiseField::default().seed(), DEFAULT_NOISE_SEED);
    }
}

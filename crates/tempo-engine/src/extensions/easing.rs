// extensions/easing.rs
//
// Pure easing curves for flights and tweens.
// No dependencies on nodes or the stage, just math.

use serde::{Deserialize, Serialize};
use crate::error::{ensure_open_range, ensure_positive, ConfigError};

/// Two-branch cubic in/out curve.
///
/// Below `midpoint` the curve is `initial_multiplier * t^3`; from `midpoint` on it is
/// `1 - (end_scale - end_scale * t)^power / end_divisor`. Continuity at the
/// midpoint is up to whoever picks the constants: a mismatch shows up as a seam
/// in the motion, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingConfig {
    pub midpoint: f32,
    pub initial_multiplier: f32,
    pub end_scale: f32,
    pub power: f32,
    pub end_divisor: f32,
}

impl Default for EasingConfig {
    /// The classic cubic in/out: `4t^3`, then `1 - (2 - 2t)^3 / 2`.
    fn default() -> Self {
        Self {
            midpoint: 0.5,
            initial_multiplier: 4.0,
            end_scale: 2.0,
            power: 3.0,
            end_divisor: 2.0,
        }
    }
}

impl EasingConfig {
    /// Evaluate the curve. `t` is used as given, not clamped.
    #[inline]
    pub fn ease(&self, t: f32) -> f32 {
        if t < self.midpoint {
            self.initial_multiplier * t * t * t
        } else {
            1.0 - (-self.end_scale * t + self.end_scale).powf(self.power) / self.end_divisor
        }
    }

    /// Size of the jump between the two branches at the midpoint.
    pub fn seam(&self) -> f32 {
        let m = self.midpoint;
        let head = self.initial_multiplier * m * m * m;
        let tail = 1.0 - (-self.end_scale * m + self.end_scale).powf(self.power) / self.end_divisor;
        (tail - head).abs()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_open_range("easing.midpoint", self.midpoint, 0.0, 1.0)?;
        ensure_positive("easing.end_divisor", self.end_divisor)?;
        if self.seam() > 1e-3 {
            log::warn!(
                "easing branches meet with a seam of {:.4} at midpoint {}",
                self.seam(),
                self.midpoint
            );
        }
        Ok(())
    }
}

/// Easing applied by a tween.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow end ("power2.out").
    QuadOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}

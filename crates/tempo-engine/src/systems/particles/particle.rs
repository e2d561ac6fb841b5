//! One pooled flame particle and its lifecycle transitions.

use glam::Vec2;
use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::config::{EmitterConfig, FadeConfig, ParticleConfig};
use super::fade::peak_fade;
use super::rng::Rng;

/// Outcome of advancing a particle by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStep {
    Alive,
    /// Crossed the early-recycle threshold; reset it before drawing.
    Recycle,
}

/// A pooled particle. `pos`, `scale` and `alpha` are derived each frame and
/// copied onto the particle's node.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub node: NodeId,
    pub life_ms: f32,
    pub max_life_ms: f32,
    /// Pixels per millisecond.
    pub velocity: Vec2,
    pub start_scale: f32,
    pub end_scale: f32,
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

impl Particle {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            life_ms: 0.0,
            max_life_ms: 0.0,
            velocity: Vec2::ZERO,
            start_scale: 1.0,
            end_scale: 1.0,
            pos: Vec2::ZERO,
            scale: 1.0,
            alpha: 0.0,
        }
    }

    /// Re-roll the particle at `center`.
    ///
    /// An initial spawn starts part-way into its life (and correspondingly
    /// faded) so a fresh pool does not pulse in lockstep.
    pub fn reset(
        &mut self,
        center: Vec2,
        initial_spawn: bool,
        cfg: &ParticleConfig,
        emitter: &EmitterConfig,
        rng: &mut Rng,
    ) {
        self.max_life_ms = rng.in_range(cfg.life_ms);
        self.life_ms = if initial_spawn {
            rng.between(0.0, self.max_life_ms * cfg.initial_life_portion)
        } else {
            0.0
        };
        self.velocity = Vec2::new(rng.in_range(cfg.velocity_x), rng.in_range(cfg.velocity_y));
        self.start_scale = rng.in_range(cfg.start_scale);
        self.end_scale = rng.in_range(cfg.end_scale);
        self.pos = center
            + Vec2::new(
                rng.in_range(emitter.spawn_jitter_x),
                rng.in_range(emitter.spawn_jitter_y),
            );
        self.alpha = if initial_spawn {
            cfg.initial_alpha.max(1.0 - self.life_ms / self.max_life_ms)
        } else {
            cfg.initial_alpha
        };
        self.scale = self.start_scale;
    }

    /// Age by `dt_ms` and derive the frame's visuals.
    /// On `Recycle` nothing but `life_ms` has changed.
    pub fn advance(&mut self, dt_ms: f32, cfg: &ParticleConfig, fade: &FadeConfig) -> ParticleStep {
        self.life_ms += dt_ms;
        if self.life_ms >= self.max_life_ms * cfg.reset_early_ratio {
            return ParticleStep::Recycle;
        }
        let t = self.life_ms / self.max_life_ms;
        self.pos += self.velocity * dt_ms;
        self.alpha = peak_fade(t, fade);
        self.scale = self.start_scale + (self.end_scale - self.start_scale) * t;
        ParticleStep::Alive
    }

    /// Normalized life in [0, 1).
    pub fn progress(&self) -> f32 {
        if self.max_life_ms > 0.0 {
            self.life_ms / self.max_life_ms
        } else {
            0.0
        }
    }

    /// Copy the derived visuals onto the node.
    pub fn write_to(&self, node: &mut Node) {
        node.pos = self.pos;
        node.scale = Vec2::splat(self.scale);
        node.set_alpha(self.alpha);
    }
}

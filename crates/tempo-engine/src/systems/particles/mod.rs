//! Fixed-pool particle system for the flame effect.
//!
//! The pool is allocated once; particles are recycled in place shortly before
//! their life runs out and re-rolled at the current emitter centre.

mod fade;
mod particle;
mod rng;

pub use fade::peak_fade;
pub use particle::{Particle, ParticleStep};
pub use rng::Rng;

use glam::Vec2;
use crate::api::scene::Stage;
use crate::api::types::NodeId;
use crate::components::layer::RenderLayer;
use crate::components::node::Node;
use crate::components::sprite::{BlendMode, SpriteComponent, TextureId};
use crate::config::FlameConfig;
use crate::core::clock::TickHandle;
use crate::core::viewport::Viewport;

pub struct ParticleSystem {
    layer: NodeId,
    particles: Vec<Particle>,
    config: FlameConfig,
    center: Vec2,
    center_initialized: bool,
    rng: Rng,
    tick: Option<TickHandle>,
}

impl ParticleSystem {
    /// Spawn `config.max_particles` additive sprites under `layer` and start ticking.
    pub fn new(stage: &mut Stage, layer: NodeId, texture: TextureId, config: FlameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| stage.fresh_seed());
        let mut rng = Rng::new(seed);
        let mut particles = Vec::with_capacity(config.max_particles);
        for i in 0..config.max_particles {
            let id = stage.next_id();
            let mut particle = Particle::new(id);
            particle.reset(Vec2::ZERO, true, &config.particle, &config.emitter, &mut rng);
            let mut node = Node::new(id)
                .with_tag(format!("flame-particle-{}", i))
                .with_parent(layer)
                .with_layer(RenderLayer::Effects)
                .with_sprite(SpriteComponent::new(texture).with_blend(BlendMode::Additive));
            particle.write_to(&mut node);
            stage.nodes.spawn(node);
            particles.push(particle);
        }
        log::info!("particle pool created with {} particles", particles.len());

        Self {
            layer,
            particles,
            config,
            center: Vec2::ZERO,
            center_initialized: false,
            rng,
            tick: Some(stage.clock.subscribe()),
        }
    }

    /// Advance every particle by the last frame delta.
    pub fn update(&mut self, stage: &mut Stage) {
        if self.tick.is_none() {
            return;
        }
        let dt = stage.clock.delta_ms();
        let cfg = &self.config;
        for particle in &mut self.particles {
            if particle.advance(dt, &cfg.particle, &cfg.fade) == ParticleStep::Recycle {
                particle.reset(self.center, false, &cfg.particle, &cfg.emitter, &mut self.rng);
            }
            if let Some(node) = stage.nodes.get_mut(particle.node) {
                particle.write_to(node);
            }
        }
    }

    /// Move the emitter for a new viewport.
    ///
    /// The first call re-rolls the whole pool at the new centre; later calls
    /// only affect particles as they recycle.
    pub fn set_center(&mut self, stage: &mut Stage, viewport: Viewport) {
        let emitter = &self.config.emitter;
        let drop = emitter
            .y_offset_max
            .min(viewport.height * emitter.y_offset_height_ratio);
        self.center = Vec2::new(
            viewport.width * emitter.x_ratio,
            viewport.height * emitter.y_ratio + drop + self.config.placement_y_offset,
        );

        if !self.center_initialized {
            self.center_initialized = true;
            let cfg = &self.config;
            for particle in &mut self.particles {
                particle.reset(self.center, true, &cfg.particle, &cfg.emitter, &mut self.rng);
                if let Some(node) = stage.nodes.get_mut(particle.node) {
                    particle.write_to(node);
                }
            }
            log::info!("flame emitter bootstrapped at ({:.1}, {:.1})", self.center.x, self.center.y);
        }
    }

    /// Stop ticking and remove the pooled nodes. Safe to call repeatedly.
    pub fn destroy(&mut self, stage: &mut Stage) {
        if let Some(tick) = self.tick.take() {
            stage.clock.unsubscribe(tick);
            for particle in &self.particles {
                stage.nodes.despawn(particle.node);
            }
            log::debug!("particle pool released");
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn layer(&self) -> NodeId {
        self.layer
    }

    pub fn is_mounted(&self) -> bool {
        self.tick.is_some()
    }
}

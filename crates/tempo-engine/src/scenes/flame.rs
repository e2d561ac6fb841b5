//! Phoenix Flame: a small additive particle fire over a torch and a backdrop.

use glam::Vec2;

use crate::api::scene::{Scene, Stage};
use crate::api::types::NodeId;
use crate::assets::registry::TextureRegistry;
use crate::components::layer::RenderLayer;
use crate::components::node::Node;
use crate::components::sprite::SpriteComponent;
use crate::config::FlameConfig;
use crate::core::viewport::{ResizePayload, Viewport};
use crate::input::queue::InputQueue;
use crate::systems::particles::ParticleSystem;

pub const ROUTE: &str = "/phoenix-flame";

/// Texture names looked up in the registry.
pub const FLAME_TEXTURE: &str = "flame";
pub const BACKGROUND_TEXTURE: &str = "flame-background";
pub const TORCH_TEXTURE: &str = "torch";

/// A full-screen or fitted sprite and the pixel size it was drawn at.
struct Backdrop {
    node: NodeId,
    size: Vec2,
}

impl Backdrop {
    /// Hidden when the texture is missing, so the flame still runs on its own.
    fn spawn(
        stage: &mut Stage,
        textures: &TextureRegistry,
        name: &str,
        layer: RenderLayer,
        fallback_size: f32,
    ) -> Self {
        let node = stage.next_id();
        let texture = textures.get(name);
        if texture.is_none() {
            log::debug!("no {:?} texture; sprite stays hidden", name);
        }
        let mut sprite_node = Node::new(node)
            .with_tag(name)
            .with_layer(layer)
            .with_sprite(SpriteComponent::new(texture.unwrap_or_default()));
        sprite_node.visible = texture.is_some();
        stage.nodes.spawn(sprite_node);

        let size = texture
            .and_then(|id| textures.size(id))
            .unwrap_or(Vec2::splat(fallback_size));
        Self { node, size }
    }

    fn place(&self, stage: &mut Stage, pos: Vec2, scale: f32) {
        if let Some(node) = stage.nodes.get_mut(self.node) {
            node.pos = pos;
            node.scale = Vec2::splat(scale);
        }
    }
}

/// `max(w / tw, h / th)`: fills the viewport, cropping the overflow.
pub fn cover_scale(viewport: Viewport, texture: Vec2) -> f32 {
    (viewport.width / texture.x).max(viewport.height / texture.y)
}

/// `min(w / tw, h / th)`: fits inside the viewport.
pub fn contain_scale(viewport: Viewport, texture: Vec2) -> f32 {
    (viewport.width / texture.x).min(viewport.height / texture.y)
}

pub struct FlameScene {
    design: Viewport,
    config: FlameConfig,
    background: Backdrop,
    torch: Backdrop,
    layer: NodeId,
    system: ParticleSystem,
    destroyed: bool,
}

impl FlameScene {
    pub fn new(stage: &mut Stage, config: FlameConfig, textures: &TextureRegistry) -> Self {
        let fallback = config.texture_size_fallback;
        let background = Backdrop::spawn(
            stage,
            textures,
            BACKGROUND_TEXTURE,
            RenderLayer::Background,
            fallback,
        );
        let torch = Backdrop::spawn(stage, textures, TORCH_TEXTURE, RenderLayer::Objects, fallback);

        let layer = stage.next_id();
        stage.nodes.spawn(
            Node::new(layer)
                .with_tag("particle-layer")
                .with_layer(RenderLayer::Effects),
        );
        let texture = textures.get(FLAME_TEXTURE).unwrap_or_default();
        let system = ParticleSystem::new(stage, layer, texture, config.clone());
        Self {
            design: config.design,
            config,
            background,
            torch,
            layer,
            system,
            destroyed: false,
        }
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn layer(&self) -> NodeId {
        self.layer
    }

    pub fn background(&self) -> NodeId {
        self.background.node
    }

    pub fn torch(&self) -> NodeId {
        self.torch.node
    }

    fn layout_backdrops(&self, stage: &mut Stage, viewport: Viewport) {
        let center_x = viewport.width / 2.0;
        self.background.place(
            stage,
            Vec2::new(center_x, viewport.height / 2.0),
            cover_scale(viewport, self.background.size),
        );
        self.torch.place(
            stage,
            Vec2::new(
                center_x,
                viewport.height / self.config.torch_y_ratio + self.config.placement_y_offset,
            ),
            contain_scale(viewport, self.torch.size) / self.config.torch_scale_divisor,
        );
    }
}

impl Scene for FlameScene {
    fn name(&self) -> &'static str {
        ROUTE
    }

    fn design(&self) -> Viewport {
        self.design
    }

    fn resize(&mut self, stage: &mut Stage, payload: ResizePayload) {
        if self.destroyed {
            return;
        }
        let viewport = payload.viewport();
        self.layout_backdrops(stage, viewport);
        self.system.set_center(stage, viewport);
    }

    fn update(&mut self, stage: &mut Stage, _input: &InputQueue) {
        self.system.update(stage);
    }

    fn destroy(&mut self, stage: &mut Stage) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.system.destroy(stage);
        stage.nodes.despawn_tree(self.layer);
        stage.nodes.despawn(self.torch.node);
        stage.nodes.despawn(self.background.node);
    }
}

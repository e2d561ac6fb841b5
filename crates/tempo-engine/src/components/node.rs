use glam::Vec2;
use crate::api::types::NodeId;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;

/// A renderable node. Systems only ever write to nodes.
///
/// `pos` and `scale` are local to `parent` when one is set, screen space otherwise.
/// The stage owns nodes; systems refer to them by `NodeId` and never outlive them.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name (labels in the host inspector).
    pub tag: String,
    /// Inactive nodes are skipped by rendering.
    pub active: bool,
    /// Hidden nodes keep their state but are not drawn.
    pub visible: bool,
    /// Position relative to the parent.
    pub pos: Vec2,
    /// Scale relative to the parent.
    pub scale: Vec2,
    /// Optional container node this one is positioned in.
    pub parent: Option<NodeId>,
    /// Draw layer.
    pub layer: RenderLayer,
    /// Sprite component (nodes without sprites are pure containers).
    pub sprite: Option<SpriteComponent>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            visible: true,
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            parent: None,
            layer: RenderLayer::default(),
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Sprite alpha, or 1.0 for containers.
    pub fn alpha(&self) -> f32 {
        self.sprite.map_or(1.0, |s| s.alpha)
    }

    /// Set the sprite alpha. No-op on containers.
    pub fn set_alpha(&mut self, alpha: f32) {
        if let Some(sprite) = &mut self.sprite {
            sprite.alpha = alpha;
        }
    }
}

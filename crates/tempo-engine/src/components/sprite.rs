/// Identifies a texture the host has loaded.
/// Index into the manifest's texture list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// Blend mode for sprite rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Alpha,
    /// Additive blending, used for the flame particles.
    Additive,
}

/// Sprite component. Defines how a node appears visually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    /// Texture drawn for this node.
    pub texture: TextureId,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Blend mode for rendering.
    pub blend: BlendMode,
}

impl SpriteComponent {
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            ..Self::default()
        }
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            texture: TextureId(0),
            alpha: 1.0,
            blend: BlendMode::Alpha,
        }
    }
}

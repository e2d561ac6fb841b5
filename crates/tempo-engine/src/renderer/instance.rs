use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Position and scale are in screen space, with parent transforms applied.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Texture index from the manifest.
    pub texture: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Render layer, for hosts that keep separate containers per layer.
    pub layer: f32,
    /// Node id, so the host can label or pick sprites.
    pub node: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all sprite instances for one frame.
pub struct RenderBuffer {
    /// Sprite instances to be rendered, ordered by blend mode:
    /// alpha-blended instances first, then additive instances from `additive_split`.
    pub instances: Vec<RenderInstance>,
    /// Instances [0..additive_split) alpha blend, [additive_split..] add.
    pub additive_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            additive_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.additive_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_additive_split(&mut self, split: u32) {
        self.additive_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of the instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for host reads out of wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

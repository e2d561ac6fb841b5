use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// An event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    /// A dialogue line was shown. `a` = index, `b` = total, `c` = autoplay cycle id
    /// (0 outside autoplay). Hosts echo the cycle id back when line audio ends.
    pub const DIALOGUE_PROGRESS: f32 = 1.0;
    /// Autoplay toggled. `a` = 1.0 when playing.
    pub const AUTOPLAY_CHANGED: f32 = 2.0;
    /// A card landed in the dealer scene. `a` = landed count, `b` = total.
    pub const CARD_LANDED: f32 = 3.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

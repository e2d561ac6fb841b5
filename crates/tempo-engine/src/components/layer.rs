/// Render layer. Controls draw order for nodes.
///
/// Layers are drawn back-to-front: Background first, Ui last.
/// Within a layer, nodes keep their store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    #[default]
    Objects = 1,
    Effects = 2,
    Ui = 3,
}

impl RenderLayer {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

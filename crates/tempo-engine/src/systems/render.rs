use crate::components::sprite::BlendMode;
use crate::core::nodes::NodeStore;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from the node store.
///
/// Active, visible sprite nodes are emitted in layer order and, within a
/// layer, in store order. Alpha-blended instances come first, additive ones
/// after `additive_split`. Positions and scales are composed through parents.
pub fn build_render_buffer(nodes: &NodeStore, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut drawable: Vec<_> = nodes
        .iter()
        .filter(|n| n.active && n.visible && n.sprite.is_some())
        .collect();
    // stable: store order survives within a layer
    drawable.sort_by_key(|n| n.layer.as_u8());

    let mut additive: Vec<RenderInstance> = Vec::new();
    for node in drawable {
        let Some(sprite) = node.sprite else { continue };
        let Some((pos, scale)) = nodes.world_transform(node.id) else {
            continue;
        };
        let instance = RenderInstance {
            x: pos.x,
            y: pos.y,
            scale_x: scale.x,
            scale_y: scale.y,
            texture: sprite.texture.0 as f32,
            alpha: sprite.alpha,
            layer: node.layer.as_u8() as f32,
            node: node.id.0 as f32,
        };
        match sprite.blend {
            BlendMode::Alpha => buffer.push(instance),
            BlendMode::Additive => additive.push(instance),
        }
    }

    buffer.set_additive_split(buffer.instance_count());
    for inst in additive {
        buffer.push(inst);
    }
}

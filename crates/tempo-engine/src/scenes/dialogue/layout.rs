use glam::Vec2;

use crate::config::{DialogueConfig, Side, SpeakerSlotConfig};
use crate::core::viewport::{Orientation, Viewport};

/// Where one speaker sits for the current viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    pub name: String,
    pub side: Side,
    pub pos: Vec2,
    /// Avatar scale before focus.
    pub base_scale: f32,
}

/// `max(min_size, min(w, h) * ratio)`.
pub fn avatar_size(viewport: Viewport, config: &DialogueConfig) -> f32 {
    config
        .avatar_min_size
        .max(viewport.min_side() * config.avatar_size_ratio)
}

pub fn slot_position(viewport: Viewport, slot: &SpeakerSlotConfig) -> Vec2 {
    let ratio = match viewport.orientation() {
        Orientation::Landscape => slot.landscape,
        Orientation::Portrait => slot.portrait,
    };
    viewport.at_ratio(ratio.x_ratio, ratio.y_ratio)
}

/// Lay out every configured slot, in configuration order.
pub fn layout_slots(viewport: Viewport, config: &DialogueConfig) -> Vec<SlotLayout> {
    let base_scale = avatar_size(viewport, config) / config.avatar_min_size;
    config
        .slots
        .iter()
        .map(|slot| SlotLayout {
            name: slot.name.clone(),
            side: slot.side,
            pos: slot_position(viewport, slot),
            base_scale,
        })
        .collect()
}

/// Bubble position relative to its avatar. Right-side speakers mirror x.
pub fn bubble_offset(side: Side, config: &DialogueConfig) -> Vec2 {
    let (x, y) = config.bubble_offset;
    match side {
        Side::Left => Vec2::new(x, y),
        Side::Right => Vec2::new(-x, y),
    }
}

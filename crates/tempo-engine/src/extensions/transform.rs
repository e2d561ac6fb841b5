// extensions/transform.rs
//
// Screen space vs container-local space.
// A container node with an origin and a uniform scale maps one onto the other;
// keeping the two point types distinct stops a screen value from being written
// into a local field (or the reverse) without an explicit conversion.
//
// Usage:
//   let space = ContainerSpace::new(ScreenPoint::new(840.0, 360.0), 0.35);
//   let local = space.to_local(ScreenPoint::new(360.0, 360.0));
//   node.pos = local.0;

use glam::Vec2;
use crate::components::node::Node;

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint(pub Vec2);

/// A point in a container's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPoint(pub Vec2);

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl LocalPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Placement of a uniformly scaled container on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSpace {
    pub origin: ScreenPoint,
    pub scale: f32,
}

impl Default for ContainerSpace {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::default(),
            scale: 1.0,
        }
    }
}

impl ContainerSpace {
    pub fn new(origin: ScreenPoint, scale: f32) -> Self {
        Self { origin, scale }
    }

    pub fn to_local(&self, point: ScreenPoint) -> LocalPoint {
        LocalPoint((point.0 - self.origin.0) / self.scale)
    }

    pub fn to_screen(&self, point: LocalPoint) -> ScreenPoint {
        ScreenPoint(self.origin.0 + point.0 * self.scale)
    }

    /// Write this placement into a container node.
    pub fn apply_to(&self, node: &mut Node) {
        node.pos = self.origin.0;
        node.scale = Vec2::splat(self.scale);
    }
}

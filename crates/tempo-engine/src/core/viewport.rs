use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite extents. Layout code ignores these.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point at the given fractions of the viewport.
    pub fn at_ratio(&self, x_ratio: f32, y_ratio: f32) -> Vec2 {
        Vec2::new(self.width * x_ratio, self.height * y_ratio)
    }

    pub fn orientation(&self) -> Orientation {
        if self.width >= self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// `base * min(1, w / bw, h / bh)`: shrinks with small viewports, never grows.
pub fn responsive_scale(base: f32, viewport: Viewport, breakpoint: Viewport) -> f32 {
    let fit_w = viewport.width / breakpoint.width;
    let fit_h = viewport.height / breakpoint.height;
    base * 1.0_f32.min(fit_w).min(fit_h)
}

/// What a scene receives on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePayload {
    pub width: f32,
    pub height: f32,
    /// `min(w / design_w, h / design_h)`.
    pub scale: f32,
}

impl ResizePayload {
    pub fn new(viewport: Viewport, design: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            scale: (viewport.width / design.width).min(viewport.height / design.height),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responsive_scale_caps_at_base() {
        let bp = Viewport::new(1200.0, 720.0);
        assert_eq!(responsive_scale(0.35, Viewport::new(2400.0, 1440.0), bp), 0.35);
        let s = responsive_scale(0.35, Viewport::new(600.0, 720.0), bp);
        assert!((s - 0.175).abs() < 1e-6);
        let s = responsive_scale(1.0, Viewport::new(1200.0, 360.0), bp);
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_viewports() {
        assert!(Viewport::new(0.0, 100.0).is_degenerate());
        assert!(Viewport::new(100.0, -1.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 100.0).is_degenerate());
        assert!(!Viewport::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn orientation_prefers_landscape_when_square() {
        assert_eq!(Viewport::new(500.0, 500.0).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(400.0, 800.0).orientation(), Orientation::Portrait);
    }

    #[test]
    fn resize_payload_scale() {
        let p = ResizePayload::new(Viewport::new(960.0, 1080.0), Viewport::new(1920.0, 1080.0));
        assert_eq!(p.scale, 0.5);
    }
}

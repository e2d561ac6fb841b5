// extensions/mod.rs
//
// Animation building blocks that sit on top of the stage.
// They address nodes by NodeId only; scenes opt in by owning them.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, EasingConfig, lerp, lerp_vec2};
pub use transform::{ContainerSpace, LocalPoint, ScreenPoint};
pub use tween::{Tween, TweenId, TweenState, TweenTarget};

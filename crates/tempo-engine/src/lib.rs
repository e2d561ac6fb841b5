pub mod api;
pub mod assets;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod scenes;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::scene::{Scene, Stage};
pub use api::types::{NodeId, SceneEvent};
pub use assets::manifest::ShowcaseManifest;
pub use assets::registry::TextureRegistry;
pub use components::layer::RenderLayer;
pub use components::node::Node;
pub use components::sprite::{BlendMode, SpriteComponent, TextureId};
pub use config::{
    CardDealerConfig, DialogueConfig, FlameConfig, LaunchOrder, LauncherConfig, Range,
    ShowcaseConfig,
};
pub use core::clock::{FpsMeter, FrameClock, TickHandle};
pub use core::nodes::NodeStore;
pub use core::timer::{IntervalTimer, TimerId};
pub use core::viewport::{ResizePayload, Viewport};
pub use error::{ConfigError, ShowcaseError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use scenes::{SceneDirector, SceneKind};
pub use systems::launcher::SequentialLauncher;
pub use systems::particles::ParticleSystem;
pub use systems::render::build_render_buffer;

pub use extensions::{
    lerp, lerp_vec2, ContainerSpace, Easing, EasingConfig, LocalPoint, ScreenPoint, Tween,
    TweenId, TweenState, TweenTarget,
};

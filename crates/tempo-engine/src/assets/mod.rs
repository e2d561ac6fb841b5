pub mod manifest;
pub mod registry;

pub use manifest::{GameCard, GameTheme, ShowcaseManifest, TextureDescriptor};
pub use registry::TextureRegistry;

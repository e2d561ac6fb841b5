pub mod layer;
pub mod node;
pub mod sprite;

pub mod launcher;
pub mod particles;
pub mod render;

pub mod clock;
pub mod nodes;
pub mod timer;
pub mod viewport;

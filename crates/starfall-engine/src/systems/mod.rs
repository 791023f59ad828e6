pub mod effects;
pub mod orbit;
pub mod picking;
pub mod render;
pub mod shooter;
pub mod starfield;

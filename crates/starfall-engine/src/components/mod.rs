pub mod body;
pub mod geometry;
pub mod material;

// extensions/mod.rs
//
// Optional extension modules for Starfall.
// Decoupled from the body store: scenes opt in by creating these systems.

pub mod transform;

pub use transform::{PivotGroup, TransformGraph};

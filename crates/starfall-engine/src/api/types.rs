use bytemuck::{Pod, Zeroable};

/// Unique identifier for a renderable body in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Identifier of a pivot group in the transform hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

/// Identifier of a live particle system owned by the destruction effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleSystemId(pub u32);

/// Identifier of a shooter entity (asteroid or projectile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A scene event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// A body was picked and replaced by a particle system. `a` = body id.
    pub const BODY_DESTROYED: f32 = 1.0;
    /// A projectile hit an asteroid. `a` = asteroid id, `b` = projectile id,
    /// `c` = hits so far.
    pub const ASTEROID_HIT: f32 = 2.0;
}

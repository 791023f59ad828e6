use glam::{Affine3A, Quat, Vec3};

use crate::api::types::BodyId;
use crate::components::geometry::Geometry;
use crate::components::material::Material;

/// A renderable object: geometry + material + local transform.
/// Its parent pivot group (if any) is tracked by the transform graph.
#[derive(Debug, Clone)]
pub struct Body {
    /// Unique identifier.
    pub id: BodyId,
    /// String tag for finding bodies by name.
    pub tag: String,
    /// Invisible bodies are skipped when building the frame.
    pub visible: bool,
    /// Offset from the parent group's origin.
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub geometry: Geometry,
    pub material: Material,
}

impl Body {
    pub fn new(id: BodyId, geometry: Geometry, material: Material) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry,
            material,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Transform from body space to parent-group space.
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

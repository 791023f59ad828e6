//! Particle cloud left behind by a destroyed body.

use glam::{Affine3A, Vec3};

use crate::api::types::{BodyId, ParticleSystemId};
use crate::components::material::Material;
use crate::systems::effects::rng::RandomSource;

/// Point cloud with one velocity per point and a single shared fade value.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub id: ParticleSystemId,
    /// Body this cloud was made from.
    pub source: BodyId,
    pub positions: Vec<Vec3>,
    /// Parallel to `positions`; assigned once at spawn.
    pub velocities: Vec<Vec3>,
    /// Shared by every point. Fadeable materials age; opaque ones never expire.
    pub material: Material,
    /// Point sprite size in world units.
    pub point_size: f32,
}

impl ParticleSystem {
    /// Build a cloud from a vertex set already in world space.
    ///
    /// Each velocity component is uniform in [-1, 1). Velocities are not
    /// normalized, so denser meshes do not explode any slower.
    pub fn from_points(
        id: ParticleSystemId,
        source: BodyId,
        positions: Vec<Vec3>,
        material: Material,
        point_size: f32,
        rng: &mut impl RandomSource,
    ) -> Self {
        let velocities = positions
            .iter()
            .map(|_| Vec3::new(rng.signed_unit(), rng.signed_unit(), rng.signed_unit()))
            .collect();
        Self {
            id,
            source,
            positions,
            velocities,
            material,
            point_size,
        }
    }

    /// Build a cloud from local-space vertices and the body's world matrix.
    pub fn from_vertices(
        id: ParticleSystemId,
        source: BodyId,
        vertices: &[Vec3],
        world: Affine3A,
        material: Material,
        point_size: f32,
        rng: &mut impl RandomSource,
    ) -> Self {
        let positions = vertices.iter().map(|&v| world.transform_point3(v)).collect();
        Self::from_points(id, source, positions, material, point_size, rng)
    }

    /// Advance every point by `velocity * step` and fade by `decay`.
    /// Returns false once the shared opacity has reached zero.
    pub fn tick(&mut self, step: f32, decay: f32) -> bool {
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p += *v * step;
        }
        match self.material.opacity.fade(decay) {
            Some(opacity) => opacity > 0.0,
            None => true,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.material.opacity.alpha()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

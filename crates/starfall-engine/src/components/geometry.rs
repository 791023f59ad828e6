use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::instance::MeshInstance;

/// Shape a body is built from. Vertex sets are generated on demand and are
/// deterministic for a given shape, so particle clouds derived from them are
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// UV sphere centered on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Axis-aligned box centered on the origin.
    Box { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    pub const MIN_WIDTH_SEGMENTS: u32 = 3;
    pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: width_segments.max(Self::MIN_WIDTH_SEGMENTS),
            height_segments: height_segments.max(Self::MIN_HEIGHT_SEGMENTS),
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Box { width, height, depth }
    }

    /// Number of vertices `vertices()` will produce.
    pub fn vertex_count(&self) -> usize {
        match *self {
            Geometry::Sphere { width_segments, height_segments, .. } => {
                (width_segments as usize + 1) * (height_segments as usize + 1)
            }
            Geometry::Box { .. } => 24,
        }
    }

    /// Local-space vertex positions.
    ///
    /// Spheres are laid out latitude-major: `height_segments + 1` rings from
    /// the north pole down, each with `width_segments + 1` vertices (the seam
    /// vertex is duplicated). Boxes emit four corners per face.
    pub fn vertices(&self) -> Vec<Vec3> {
        match *self {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                let mut out = Vec::with_capacity(self.vertex_count());
                for iy in 0..=height_segments {
                    let v = iy as f32 / height_segments as f32;
                    for ix in 0..=width_segments {
                        let u = ix as f32 / width_segments as f32;
                        out.push(Vec3::new(
                            -radius * (u * TAU).cos() * (v * PI).sin(),
                            radius * (v * PI).cos(),
                            radius * (u * TAU).sin() * (v * PI).sin(),
                        ));
                    }
                }
                out
            }
            Geometry::Box { .. } => {
                let h = self.half_extents();
                let mut out = Vec::with_capacity(24);
                // (normal axis, u axis, v axis)
                let faces = [(0usize, 2usize, 1usize), (1, 0, 2), (2, 0, 1)];
                for (axis, ua, va) in faces {
                    for side in [1.0f32, -1.0] {
                        for (su, sv) in [(-1.0f32, 1.0f32), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
                            let mut p = [0.0f32; 3];
                            p[axis] = side * h[axis];
                            p[ua] = su * h[ua];
                            p[va] = sv * h[va];
                            out.push(Vec3::from_array(p));
                        }
                    }
                }
                out
            }
        }
    }

    /// Half size along each local axis.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Geometry::Sphere { radius, .. } => Vec3::splat(radius),
            Geometry::Box { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
        }
    }

    /// Wire tag used by the host renderer to pick a mesh.
    pub fn shape_kind(&self) -> f32 {
        match self {
            Geometry::Sphere { .. } => MeshInstance::SHAPE_SPHERE,
            Geometry::Box { .. } => MeshInstance::SHAPE_BOX,
        }
    }

    /// Intersect a local-space ray with this shape.
    ///
    /// `dir` does not need to be normalized; the returned parameter `t` is in
    /// units of `dir`, so a ray transformed into local space keeps the same
    /// `t` as its world-space original. Hits behind the origin are ignored; a
    /// ray starting inside the shape reports its exit point.
    pub fn intersect_local(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match *self {
            Geometry::Sphere { radius, .. } => {
                let a = dir.length_squared();
                if a <= f32::EPSILON {
                    return None;
                }
                let b = origin.dot(dir);
                let c = origin.length_squared() - radius * radius;
                let disc = b * b - a * c;
                if disc < 0.0 {
                    return None;
                }
                let sqrt_d = disc.sqrt();
                let t1 = (-b - sqrt_d) / a;
                let t2 = (-b + sqrt_d) / a;
                if t1 >= 0.0 {
                    Some(t1)
                } else if t2 >= 0.0 {
                    Some(t2)
                } else {
                    None
                }
            }
            Geometry::Box { .. } => {
                let h = self.half_extents();
                let mut t_min = f32::NEG_INFINITY;
                let mut t_max = f32::INFINITY;
                for i in 0..3 {
                    let (o, d, half) = (origin[i], dir[i], h[i]);
                    if d.abs() <= f32::EPSILON {
                        if o < -half || o > half {
                            return None;
                        }
                        continue;
                    }
                    let mut t0 = (-half - o) / d;
                    let mut t1 = (half - o) / d;
                    if t0 > t1 {
                        std::mem::swap(&mut t0, &mut t1);
                    }
                    t_min = t_min.max(t0);
                    t_max = t_max.min(t1);
                    if t_max < t_min {
                        return None;
                    }
                }
                if t_max < 0.0 {
                    None
                } else if t_min >= 0.0 {
                    Some(t_min)
                } else {
                    Some(t_max)
                }
            }
        }
    }
}

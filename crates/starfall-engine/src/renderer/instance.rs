use bytemuck::{Pod, Zeroable};

use crate::renderer::camera::CameraUniform;

/// Per-body render data read by the TypeScript renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// 0.0 = sphere, 1.0 = box.
    pub shape: f32,
    /// World-space rotation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    /// Half extents after scaling (radius on every axis for spheres).
    pub extents: [f32; 3],
    /// Emissive multiplier.
    pub emissive: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    pub alpha: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const SHAPE_SPHERE: f32 = 0.0;
    pub const SHAPE_BOX: f32 = 1.0;
}

/// One point sprite (star or particle): 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    /// World-space size; negative means constant screen size (no attenuation).
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

impl PointVertex {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A contiguous run of point vertices sharing a texture and alpha test.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointBatch {
    pub start: u32,
    pub count: u32,
    /// Texture slot, or -1.0 for untextured.
    pub texture: f32,
    pub alpha_test: f32,
}

impl PointBatch {
    pub const FLOATS: usize = 4;
}

/// Everything the host needs to draw one frame.
pub struct FrameBuffers {
    pub meshes: Vec<MeshInstance>,
    pub points: Vec<PointVertex>,
    pub point_batches: Vec<PointBatch>,
    pub camera: CameraUniform,
    /// RGBA clear color.
    pub clear_color: [f32; 4],
    /// Frames rendered since the scene started.
    pub frame: u64,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self {
            meshes: Vec::with_capacity(64),
            points: Vec::with_capacity(2048),
            point_batches: Vec::with_capacity(8),
            camera: CameraUniform::zeroed(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            frame: 0,
        }
    }

    /// Empty the per-frame lists. The frame counter and camera are kept.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.points.clear();
        self.point_batches.clear();
    }

    pub fn push_mesh(&mut self, instance: MeshInstance) {
        self.meshes.push(instance);
    }

    /// Append a batch of points drawn with one texture and alpha test.
    pub fn push_points(&mut self, points: impl IntoIterator<Item = PointVertex>, texture: Option<u32>, alpha_test: f32) {
        let start = self.points.len() as u32;
        self.points.extend(points);
        let count = self.points.len() as u32 - start;
        if count == 0 {
            return;
        }
        self.point_batches.push(PointBatch {
            start,
            count,
            texture: texture.map_or(-1.0, |t| t as f32),
            alpha_test,
        });
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn batch_count(&self) -> u32 {
        self.point_batches.len() as u32
    }

    /// Raw pointers for zero-copy reads from wasm memory.
    pub fn meshes_ptr(&self) -> *const f32 {
        self.meshes.as_ptr() as *const f32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }

    pub fn batches_ptr(&self) -> *const f32 {
        self.point_batches.as_ptr() as *const f32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }
}

impl Default for FrameBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame header shared with the host renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// The header is a fixed block of 16 floats. It tells the host how many
/// records each buffer holds this frame; the buffers themselves are read
/// through their own pointers:
/// ```text
/// meshes:  mesh_count  × 16 floats (MeshInstance)
/// points:  point_count ×  8 floats (PointVertex)
/// batches: batch_count ×  4 floats (PointBatch)
/// camera:  20 floats (CameraUniform)
/// events:  event_count ×  4 floats (GameEvent)
/// ```
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{FrameBuffers, MeshInstance, PointBatch, PointVertex};

/// Number of floats in the header.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MESH_COUNT: usize = 2;
pub const HEADER_POINT_COUNT: usize = 3;
pub const HEADER_BATCH_COUNT: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_CLEAR_R: usize = 6;
pub const HEADER_CLEAR_G: usize = 7;
pub const HEADER_CLEAR_B: usize = 8;
pub const HEADER_CLEAR_A: usize = 9;
pub const HEADER_MESH_FLOATS: usize = 10;
pub const HEADER_POINT_FLOATS: usize = 11;
pub const HEADER_BATCH_FLOATS: usize = 12;
pub const HEADER_CAMERA_FLOATS: usize = 13;
pub const HEADER_EVENT_FLOATS: usize = 14;
/// 1.0 while the scene is running, 0.0 once stopped.
pub const HEADER_RUNNING: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Fill `header` from this frame's buffers.
pub fn write_header(header: &mut [f32; HEADER_FLOATS], frame: &FrameBuffers, event_count: usize, running: bool) {
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = frame.frame as f32;
    header[HEADER_MESH_COUNT] = frame.mesh_count() as f32;
    header[HEADER_POINT_COUNT] = frame.point_count() as f32;
    header[HEADER_BATCH_COUNT] = frame.batch_count() as f32;
    header[HEADER_EVENT_COUNT] = event_count as f32;
    header[HEADER_CLEAR_R..=HEADER_CLEAR_A].copy_from_slice(&frame.clear_color);
    header[HEADER_MESH_FLOATS] = MeshInstance::FLOATS as f32;
    header[HEADER_POINT_FLOATS] = PointVertex::FLOATS as f32;
    header[HEADER_BATCH_FLOATS] = PointBatch::FLOATS as f32;
    header[HEADER_CAMERA_FLOATS] = CameraUniform::FLOATS as f32;
    header[HEADER_EVENT_FLOATS] = GameEvent::FLOATS as f32;
    header[HEADER_RUNNING] = if running { 1.0 } else { 0.0 };
}

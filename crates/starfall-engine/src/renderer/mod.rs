pub mod camera;
pub mod instance;

pub use camera::{CameraUniform, OrbitControls, PerspectiveCamera, Ray};
pub use instance::{FrameBuffers, MeshInstance, PointBatch, PointVertex};

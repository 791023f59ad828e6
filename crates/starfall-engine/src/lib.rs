pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::error::{ConfigError, InitError, SceneError};
pub use api::game::{CameraConfig, Game, RenderContext, SceneConfig, SceneContext};
pub use api::types::{BodyId, EntityId, GameEvent, GroupId, ParticleSystemId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{TextureId, TextureRegistry, TextureState};
pub use bridge::protocol::HEADER_FLOATS;
pub use components::body::Body;
pub use components::geometry::Geometry;
pub use components::material::{Color, Material, Opacity};
pub use core::scene::BodyStore;
pub use core::time::{FixedTimestep, FrameScheduler, SceneState, StopHandle, TickSource};
pub use extensions::{PivotGroup, TransformGraph};
pub use input::queue::{InputEvent, InputQueue, Key, Rect};
pub use renderer::camera::{CameraUniform, OrbitControls, PerspectiveCamera, Ray};
pub use renderer::instance::{FrameBuffers, MeshInstance, PointBatch, PointVertex};
pub use systems::effects::rng::{RandomSource, Rng};
pub use systems::effects::{DestructionConfig, DestructionEffect, ParticleSystem};
pub use systems::orbit::{OrbitDescriptor, OrbitDriver, ORBIT_SAMPLES};
pub use systems::picking::{PickHit, PickableSet, Viewport};
pub use systems::render::build_frame;
pub use systems::shooter::{Asteroid, Projectile, ShooterConfig, ShooterHit, ShooterLoop};
pub use systems::starfield::{PointCloud, PointMaterial, StarfieldConfig};

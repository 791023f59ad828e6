use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::error::{ConfigError, SceneError};
use crate::api::types::{BodyId, GameEvent, GroupId, ParticleSystemId};
use crate::assets::registry::TextureRegistry;
use crate::components::body::Body;
use crate::components::material::Color;
use crate::core::scene::BodyStore;
use crate::core::time::TickSource;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::{InputEvent, Rect};
use crate::renderer::camera::{OrbitControls, PerspectiveCamera};
use crate::renderer::instance::FrameBuffers;
use crate::systems::effects::rng::Rng;
use crate::systems::effects::{DestructionConfig, DestructionEffect};
use crate::systems::orbit::{OrbitDescriptor, OrbitDriver};
use crate::systems::picking::{self, PickHit, PickableSet, Viewport};
use crate::systems::starfield::{self, PointCloud, StarfieldConfig};

/// Initial camera placement and lens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

/// Configuration for one scene, provided by the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How host frames become ticks (default: one tick per frame).
    pub tick_source: TickSource,
    pub viewport: Viewport,
    pub camera: CameraConfig,
    pub clear_color: Color,
    /// Seed for the scene's random source.
    pub seed: u64,
    /// Capacity hint for mesh instances.
    pub max_meshes: usize,
    /// Capacity hint for point vertices (stars + particles).
    pub max_points: usize,
    pub destruction: DestructionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick_source: TickSource::PerFrame,
            viewport: Viewport::default(),
            camera: CameraConfig::default(),
            clear_color: Color::new(0.0, 0.0, 0.0),
            seed: 42,
            max_meshes: 64,
            max_points: 32768,
            destruction: DestructionConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let TickSource::Fixed { dt } = self.tick_source {
            if dt <= 0.0 {
                return Err(ConfigError::Invalid(format!("fixed dt must be positive, got {dt}")));
            }
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "viewport {}x{} is empty",
                self.viewport.width, self.viewport.height
            )));
        }
        let cam = &self.camera;
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!("fov {} out of range", cam.fov_deg)));
        }
        if cam.near <= 0.0 || cam.far <= cam.near {
            return Err(ConfigError::Invalid(format!("clip range {}..{} is invalid", cam.near, cam.far)));
        }
        if self.destruction.fade_decrement <= 0.0 {
            return Err(ConfigError::Invalid("destruction fade_decrement must be positive".into()));
        }
        Ok(())
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return scene configuration. Called once before init.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Build the scene: spawn bodies, create groups, register orbits.
    fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError>;

    /// Called for every queued input event before the frame's ticks run.
    fn handle_input(&mut self, _ctx: &mut SceneContext, _event: &InputEvent) {}

    /// Per-tick game logic, after orbits and effects have advanced.
    fn update(&mut self, _ctx: &mut SceneContext) {}

    /// Optional read-only render pass for custom instances.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// All state of one scene. Scenes share nothing mutable.
pub struct SceneContext {
    pub graph: TransformGraph,
    pub bodies: BodyStore,
    pub pickables: PickableSet,
    pub orbits: OrbitDriver,
    pub destruction: DestructionEffect,
    pub starfield: Option<PointCloud>,
    pub camera: PerspectiveCamera,
    /// Camera rig updated every tick when present.
    pub controls: Option<OrbitControls>,
    pub viewport: Viewport,
    pub textures: TextureRegistry,
    pub rng: Rng,
    pub clear_color: Color,
    pub events: Vec<GameEvent>,
    next_body_id: u32,
}

impl SceneContext {
    pub fn new(config: &SceneConfig) -> Self {
        let cam = &config.camera;
        let camera = PerspectiveCamera::new(cam.fov_deg, config.viewport.aspect(), cam.near, cam.far)
            .with_position(cam.position)
            .looking_at(cam.target);
        Self {
            graph: TransformGraph::new(),
            bodies: BodyStore::new(),
            pickables: PickableSet::new(),
            orbits: OrbitDriver::new(),
            destruction: DestructionEffect::new(config.destruction.clone()),
            starfield: None,
            camera,
            controls: None,
            viewport: config.viewport,
            textures: TextureRegistry::new(),
            rng: Rng::new(config.seed),
            clear_color: config.clear_color,
            events: Vec::new(),
            next_body_id: 1,
        }
    }

    /// Generate the next unique body ID.
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    /// Add a body under `group` (`None` = scene root).
    pub fn spawn_body(&mut self, group: Option<GroupId>, body: Body) -> Result<BodyId, SceneError> {
        let id = body.id;
        self.graph.attach(group, id)?;
        self.bodies.spawn(body);
        Ok(id)
    }

    /// Make a spawned body eligible for picking.
    pub fn set_pickable(&mut self, id: BodyId) -> Result<(), SceneError> {
        if !self.bodies.contains(id) {
            return Err(SceneError::UnknownBody(id));
        }
        self.pickables.insert(id);
        Ok(())
    }

    /// Create an orbit group under `parent` with `body` on its ring.
    pub fn spawn_orbiter(
        &mut self,
        parent: Option<GroupId>,
        descriptor: OrbitDescriptor,
        body: Body,
    ) -> Result<GroupId, SceneError> {
        self.orbits
            .spawn_orbiter(&mut self.graph, &mut self.bodies, parent, descriptor, body)
    }

    /// Generate the scene's starfield. Its texture is queued for loading and
    /// only drawn once the host reports it loaded.
    pub fn generate_starfield(&mut self, config: &StarfieldConfig) {
        let texture = config.texture.as_deref().map(|path| self.textures.request(path, path));
        self.starfield = Some(starfield::generate(config, texture, &mut self.rng));
    }

    /// Nearest pickable body under a click.
    pub fn pick_at(&self, client: Vec2, rect: Rect) -> Option<PickHit> {
        picking::pick(
            client,
            rect,
            self.viewport,
            &self.camera,
            &self.pickables,
            &self.graph,
            &self.bodies,
        )
    }

    /// Remove a body from the scene and replace it with a particle cloud at
    /// its last world transform. Missing bodies are a no-op.
    pub fn destroy_body(&mut self, id: BodyId) -> Option<ParticleSystemId> {
        let Some(body) = self.bodies.despawn(id) else {
            log::trace!("destroy of unknown body {:?} ignored", id);
            return None;
        };
        let world = self.graph.world_matrix(&body);
        self.graph.detach(id);
        self.pickables.remove(id);
        let system = self.destruction.spawn(&body, world, &mut self.rng);
        self.emit_event(GameEvent {
            kind: GameEvent::BODY_DESTROYED,
            a: id.0 as f32,
            b: system.0 as f32,
            c: 0.0,
        });
        Some(system)
    }

    /// Advance the built-in systems by one tick: orbits, then particle
    /// clouds, then the camera rig.
    pub fn tick_systems(&mut self) {
        self.orbits.tick(&mut self.graph);
        let step = self.destruction.config.step_scale;
        self.destruction.tick(step);
        if let Some(controls) = &mut self.controls {
            controls.update(&mut self.camera);
        }
        self.graph.propagate();
    }

    /// Apply a new drawing-surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::debug!("resize to {width}x{height} ignored");
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(width, height);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub scene: &'a SceneContext,
    pub frame: &'a mut FrameBuffers,
}

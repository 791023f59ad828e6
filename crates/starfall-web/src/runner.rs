use starfall_engine::bridge::protocol::{write_header, HEADER_FLOATS};
use starfall_engine::systems::render::build_frame;
use starfall_engine::{
    AssetManifest, FrameBuffers, FrameScheduler, Game, InitError, InputEvent, InputQueue, RenderContext,
    SceneConfig, SceneContext, SceneState, StopHandle, TextureId,
};

/// Generic scene runner that wires up the engine loop.
///
/// Each concrete scene (e.g., `solar-system`) creates a `thread_local!`
/// SceneRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SceneRunner<G: Game> {
    game: G,
    ctx: SceneContext,
    input: InputQueue,
    frame: FrameBuffers,
    scheduler: FrameScheduler,
    config: SceneConfig,
    header: [f32; HEADER_FLOATS],
}

impl<G: Game> SceneRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let mut frame = FrameBuffers::new();
        frame.meshes.reserve(config.max_meshes);
        frame.points.reserve(config.max_points);

        Self {
            ctx: SceneContext::new(&config),
            scheduler: FrameScheduler::new(config.tick_source),
            game,
            input: InputQueue::new(),
            frame,
            config,
            header: [0.0; HEADER_FLOATS],
        }
    }

    /// Initialize the scene. Call once after construction.
    /// On error the runner stays in `Init` and ignores ticks.
    pub fn init(&mut self) -> Result<(), InitError> {
        self.config = self.game.config();
        self.config.validate()?;
        self.ctx = SceneContext::new(&self.config);
        self.scheduler = FrameScheduler::new(self.config.tick_source);
        self.game.init(&mut self.ctx)?;
        self.ctx.graph.propagate();
        self.scheduler.start();
        log::info!(
            "scene started: {} bodies, {} orbits, {} pickable",
            self.ctx.bodies.len(),
            self.ctx.orbits.len(),
            self.ctx.pickables.len()
        );
        self.render_frame();
        Ok(())
    }

    /// Queue an input event for the next tick. Ignored once stopped.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.scheduler.state() == SceneState::Stopped {
            log::trace!("input after stop ignored: {:?}", event);
            return;
        }
        self.input.push(event);
    }

    /// Run one host frame: handle queued input, run the scheduled ticks,
    /// then rebuild the frame buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.scheduler.is_running() {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Input is fully handled before any system runs this frame
        for event in self.input.drain() {
            match event {
                InputEvent::Resize { width, height } => self.ctx.resize(width, height),
                InputEvent::TextureLoaded { id, ok } => self.ctx.textures.mark_loaded(id, ok),
                _ => {}
            }
            self.game.handle_input(&mut self.ctx, &event);
        }

        let steps = self.scheduler.frame(dt);
        for _ in 0..steps {
            self.ctx.tick_systems();
            self.game.update(&mut self.ctx);
        }
        self.ctx.graph.propagate();

        self.render_frame();
    }

    fn render_frame(&mut self) {
        build_frame(
            &mut self.frame,
            &self.ctx.camera,
            &self.ctx.graph,
            &self.ctx.bodies,
            &self.ctx.destruction,
            self.ctx.starfield.as_ref(),
            &self.ctx.textures,
        );
        let c = self.ctx.clear_color;
        self.frame.clear_color = [c.r, c.g, c.b, 1.0];

        // Allow the game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                scene: &self.ctx,
                frame: &mut self.frame,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame.frame += 1;
        let running = self.scheduler.is_running();
        write_header(&mut self.header, &self.frame, self.ctx.events.len(), running);
    }

    /// Stop the loop for good. Later ticks and input are ignored.
    pub fn stop(&mut self) {
        if self.scheduler.state() == SceneState::Stopped {
            return;
        }
        self.scheduler.stop();
        self.input.clear();
        self.header[starfall_engine::bridge::protocol::HEADER_RUNNING] = 0.0;
        log::info!("scene stopped after {} frames", self.frame.frame);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.scheduler.stop_handle()
    }

    pub fn state(&mut self) -> SceneState {
        self.scheduler.state()
    }

    /// Register every texture in a JSON asset manifest for loading.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        let count = self.ctx.textures.register_manifest(&manifest);
        log::info!("manifest: {} textures", count);
        Ok(())
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn frames(&self) -> &FrameBuffers {
        &self.frame
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.frame.meshes_ptr()
    }

    pub fn mesh_count(&self) -> u32 {
        self.frame.mesh_count()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.frame.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.frame.point_count()
    }

    pub fn batches_ptr(&self) -> *const f32 {
        self.frame.batches_ptr()
    }

    pub fn batch_count(&self) -> u32 {
        self.frame.batch_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.frame.camera_ptr()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame.frame
    }

    // ---- Texture loading (host side fetches, Rust tracks state) ----

    pub fn pending_texture_count(&self) -> u32 {
        self.ctx.textures.pending().count() as u32
    }

    /// Id and path of the `index`-th pending texture.
    pub fn pending_texture(&self, index: u32) -> Option<(TextureId, String)> {
        self.ctx
            .textures
            .pending()
            .nth(index as usize)
            .map(|(id, path)| (id, path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use starfall_engine::{
        Body, BodyId, Color, Geometry, Key, Material, OrbitDescriptor, Rect, SceneError, TickSource,
    };

    /// One pickable orbiting sphere; counts ticks and key presses.
    struct Recorder {
        config: SceneConfig,
        ticks: u32,
        keys: Vec<Key>,
        planet: Option<BodyId>,
        fail_init: bool,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                config: SceneConfig {
                    camera: starfall_engine::CameraConfig {
                        fov_deg: 45.0,
                        position: Vec3::new(0.0, 0.0, 80.0),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ticks: 0,
                keys: Vec::new(),
                planet: None,
                fail_init: false,
            }
        }
    }

    impl Game for Recorder {
        fn config(&self) -> SceneConfig {
            self.config.clone()
        }

        fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
            if self.fail_init {
                return Err(SceneError::UnknownBody(BodyId(0)));
            }
            let id = ctx.next_body_id();
            let body = Body::new(id, Geometry::sphere(4.0, 16, 16), Material::new(Color::WHITE));
            ctx.spawn_orbiter(None, OrbitDescriptor::new(0.0, 0.01, Vec3::ZERO), body)?;
            ctx.set_pickable(id)?;
            self.planet = Some(id);
            Ok(())
        }

        fn handle_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) {
            match *event {
                InputEvent::PointerClick { client_x, client_y, rect } => {
                    if let Some(hit) = ctx.pick_at(glam::Vec2::new(client_x, client_y), rect) {
                        ctx.destroy_body(hit.body);
                    }
                }
                InputEvent::KeyDown { key } => self.keys.push(key),
                _ => {}
            }
        }

        fn update(&mut self, _ctx: &mut SceneContext) {
            self.ticks += 1;
        }
    }

    fn started() -> SceneRunner<Recorder> {
        let mut runner = SceneRunner::new(Recorder::new());
        runner.init().unwrap();
        runner
    }

    const RECT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn init_starts_and_renders_first_frame() {
        let mut runner = started();
        assert_eq!(runner.state(), SceneState::Running);
        assert_eq!(runner.mesh_count(), 1);
        assert_eq!(runner.frame_count(), 1);
    }

    #[test]
    fn failed_init_never_runs() {
        let mut recorder = Recorder::new();
        recorder.fail_init = true;
        let mut runner = SceneRunner::new(recorder);
        assert!(matches!(runner.init(), Err(InitError::Scene(_))));
        runner.tick(0.016);
        assert_eq!(runner.state(), SceneState::Init);
        assert_eq!(runner.game().ticks, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut recorder = Recorder::new();
        recorder.config.camera.near = 0.0;
        let mut runner = SceneRunner::new(recorder);
        assert!(matches!(runner.init(), Err(InitError::Config(_))));
    }

    #[test]
    fn one_tick_per_frame_by_default() {
        let mut runner = started();
        for _ in 0..5 {
            runner.tick(0.5);
        }
        assert_eq!(runner.game().ticks, 5);
        assert_eq!(runner.frame_count(), 6);
        let group = runner.context().orbits.iter().next().unwrap().0;
        let angle = runner.context().graph.rotation(group).unwrap();
        assert!((angle - 0.05).abs() < 1e-6);
    }

    #[test]
    fn fixed_source_accumulates_frame_time() {
        let mut recorder = Recorder::new();
        recorder.config.tick_source = TickSource::Fixed { dt: 0.25 };
        let mut runner = SceneRunner::new(recorder);
        runner.init().unwrap();
        runner.tick(0.5);
        runner.tick(0.125);
        assert_eq!(runner.game().ticks, 2);
        runner.tick(0.125);
        assert_eq!(runner.game().ticks, 3);
    }

    #[test]
    fn click_destroys_planet_before_ticks_run() {
        let mut runner = started();
        runner.push_input(InputEvent::PointerClick {
            client_x: 400.0,
            client_y: 300.0,
            rect: RECT,
        });
        runner.tick(0.016);
        let planet = runner.game().planet.unwrap();
        assert!(!runner.context().bodies.contains(planet));
        assert_eq!(runner.context().destruction.len(), 1);
        assert_eq!(runner.mesh_count(), 0);
        assert!(runner.point_count() > 0);
        assert_eq!(runner.game_events_len(), 1);

        // Events are per frame.
        runner.tick(0.016);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn resize_and_texture_events_are_applied() {
        let mut runner = started();
        let id = runner.ctx.textures.request("star", "circle.png");
        assert_eq!(runner.pending_texture_count(), 1);
        assert_eq!(runner.pending_texture(0), Some((id, "circle.png".to_string())));

        runner.push_input(InputEvent::Resize { width: 1200.0, height: 600.0 });
        runner.push_input(InputEvent::TextureLoaded { id, ok: true });
        runner.tick(0.016);
        assert_eq!(runner.context().camera.aspect, 2.0);
        assert_eq!(runner.pending_texture_count(), 0);
    }

    #[test]
    fn stopped_runner_ignores_ticks_and_input() {
        let mut runner = started();
        let handle = runner.stop_handle();
        runner.tick(0.016);
        handle.stop();
        runner.push_input(InputEvent::KeyDown { key: Key::Space });
        runner.tick(0.016);
        assert_eq!(runner.game().ticks, 1);
        assert!(runner.game().keys.is_empty());
        assert_eq!(runner.state(), SceneState::Stopped);

        runner.stop();
        runner.tick(0.016);
        assert_eq!(runner.frame_count(), 2);
    }

    #[test]
    fn load_manifest_queues_textures() {
        let mut runner = started();
        runner
            .load_manifest(r#"{ "textures": [{ "name": "star", "path": "textures/circle.png" }] }"#)
            .unwrap();
        assert_eq!(runner.pending_texture_count(), 1);
        assert!(runner.load_manifest("nope").is_err());
    }
}

pub mod runner;

pub use runner::SceneRunner;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, input handlers, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use starfall_engine::*;
///
/// mod game;
/// use game::SolarSystem;
///
/// starfall_web::export_scene!(SolarSystem, "solar-system");
/// ```
///
/// The scene type must provide `new()`. The calling crate depends on
/// `wasm-bindgen`, `log`, `console_log`, `console_error_panic_hook` and
/// `web-sys` (with the `console` feature).
#[macro_export]
macro_rules! export_scene {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$game_type>>> = RefCell::new(None);
        }

        /// Run `f` against the live runner. Calls made before `scene_init`
        /// are dropped and return `None`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    web_sys::console::warn_1(&concat!($game_name, ": call before scene_init() ignored").into());
                    None
                }
            })
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::SceneRunner::new(<$game_type>::new());
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| match r.init() {
                Ok(()) => log::info!("{}: initialized", $game_name),
                Err(e) => log::error!("{}: init failed: {}", $game_name, e),
            });
        }

        #[wasm_bindgen]
        pub fn scene_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn scene_stop() {
            with_runner(|r| r.stop());
        }

        #[wasm_bindgen]
        pub fn scene_pointer_click(
            client_x: f32,
            client_y: f32,
            rect_left: f32,
            rect_top: f32,
            rect_width: f32,
            rect_height: f32,
        ) {
            let rect = Rect::new(rect_left, rect_top, rect_width, rect_height);
            with_runner(|r| r.push_input(InputEvent::PointerClick { client_x, client_y, rect }));
        }

        #[wasm_bindgen]
        pub fn scene_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key: Key::from_code(key_code) }));
        }

        #[wasm_bindgen]
        pub fn scene_key_name(name: &str) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key: Key::from_name(name) }));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn scene_texture_loaded(id: u32, ok: bool) {
            with_runner(|r| r.push_input(InputEvent::TextureLoaded { id: TextureId(id), ok }));
        }

        #[wasm_bindgen]
        pub fn scene_load_manifest(json: &str) {
            with_runner(|r| {
                if let Err(e) = r.load_manifest(json) {
                    log::error!("{}: bad asset manifest: {}", $game_name, e);
                }
            });
        }

        // ---- Texture requests ----

        #[wasm_bindgen]
        pub fn get_pending_texture_count() -> u32 {
            with_runner(|r| r.pending_texture_count()).unwrap_or(0)
        }

        /// Texture id of the `index`-th pending load, or -1.
        #[wasm_bindgen]
        pub fn get_pending_texture_id(index: u32) -> i32 {
            with_runner(|r| r.pending_texture(index))
                .flatten()
                .map_or(-1, |(id, _)| id.0 as i32)
        }

        #[wasm_bindgen]
        pub fn get_pending_texture_path(index: u32) -> String {
            with_runner(|r| r.pending_texture(index))
                .flatten()
                .map(|(_, path)| path)
                .unwrap_or_default()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_meshes_ptr() -> *const f32 {
            with_runner(|r| r.meshes_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_mesh_count() -> u32 {
            with_runner(|r| r.mesh_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_points_ptr() -> *const f32 {
            with_runner(|r| r.points_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_point_batches_ptr() -> *const f32 {
            with_runner(|r| r.batches_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_point_batch_count() -> u32 {
            with_runner(|r| r.batch_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> f64 {
            with_runner(|r| r.frame_count() as f64).unwrap_or(0.0)
        }
    };
}

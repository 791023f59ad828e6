//! Axes Viewer: unit-length X/Y/Z axes at the origin with a camera that
//! slowly circles them.

use glam::Vec3;
use starfall_engine::*;

const AXIS_LENGTH: f32 = 1.0;
const AXIS_THICKNESS: f32 = 0.01;
const CLEAR_COLOR: u32 = 0xf6f5f4;

const AUTO_ROTATE_SPEED: f32 = 1.0;
const MIN_DISTANCE: f32 = 0.1;
const MAX_DISTANCE: f32 = 10.0;

/// (direction, color) for each axis.
const AXES: [(Vec3, u32); 3] = [
    (Vec3::X, 0xff0000),
    (Vec3::Y, 0x00ff00),
    (Vec3::Z, 0x0000ff),
];

pub struct AxesViewer;

impl AxesViewer {
    pub fn new() -> Self {
        Self
    }
}

/// A thin box running from the origin to `dir * AXIS_LENGTH`.
fn axis_geometry(dir: Vec3) -> Geometry {
    let size = dir * AXIS_LENGTH + (Vec3::ONE - dir) * AXIS_THICKNESS;
    Geometry::cuboid(size.x, size.y, size.z)
}

impl Game for AxesViewer {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            camera: CameraConfig {
                fov_deg: 50.0,
                near: 0.1,
                far: 2000.0,
                position: Vec3::ONE,
                target: Vec3::ZERO,
            },
            clear_color: Color::from_hex(CLEAR_COLOR),
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        for (dir, color) in AXES {
            let id = ctx.next_body_id();
            let body = Body::new(id, axis_geometry(dir), Material::new(Color::from_hex(color)))
                .with_position(dir * AXIS_LENGTH * 0.5);
            ctx.spawn_body(None, body)?;
        }

        ctx.controls = Some(
            OrbitControls::from_camera(&ctx.camera)
                .with_auto_rotate(AUTO_ROTATE_SPEED)
                .with_distance_limits(MIN_DISTANCE, MAX_DISTANCE),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneContext {
        let mut game = AxesViewer::new();
        let mut ctx = SceneContext::new(&game.config());
        game.init(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn axis_boxes_span_origin_to_unit() {
        let ctx = scene();
        assert_eq!(ctx.bodies.len(), 3);
        let x = ctx.bodies.iter().next().unwrap();
        assert_eq!(x.geometry.half_extents(), Vec3::new(0.5, 0.005, 0.005));
        assert_eq!(x.position, Vec3::new(0.5, 0.0, 0.0));
        assert!(ctx.pickables.is_empty());
    }

    #[test]
    fn camera_circles_at_constant_distance_and_height() {
        let mut ctx = scene();
        let start = ctx.camera.position;
        for _ in 0..900 {
            ctx.tick_systems();
        }
        let p = ctx.camera.position;
        assert!((p.length() - 3f32.sqrt()).abs() < 1e-4);
        assert!((p.y - 1.0).abs() < 1e-4);
        assert!(p.distance(start) > 0.5);
        assert_eq!(ctx.camera.target, Vec3::ZERO);
    }

    #[test]
    fn one_minute_of_frames_is_one_full_turn() {
        let mut ctx = scene();
        let start = ctx.camera.position;
        for _ in 0..3600 {
            ctx.tick_systems();
        }
        assert!(ctx.camera.position.distance(start) < 1e-2);
    }

    #[test]
    fn clear_color_is_off_white() {
        let ctx = scene();
        let c = ctx.clear_color;
        assert!(c.r > 0.95 && c.g > 0.95 && c.b > 0.95);
    }
}

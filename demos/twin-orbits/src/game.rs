//! Twin Orbits: two pivot groups spin at different rates around the
//! origin. The first also carries a large sphere at its own center, which
//! turns in place with the group.

use glam::Vec3;
use starfall_engine::*;

const AQUA: u32 = 0x00ffff;
const LIME: u32 = 0x00ff00;

const INNER: OrbitDescriptor = OrbitDescriptor {
    radius: 20.0,
    speed: 0.02,
    center_offset: Vec3::ZERO,
};
const OUTER: OrbitDescriptor = OrbitDescriptor {
    radius: 30.0,
    speed: 0.01,
    center_offset: Vec3::ZERO,
};

const MOON_RADIUS: f32 = 2.0;
const CORE_RADIUS: f32 = 16.0;

pub struct TwinOrbits {
    groups: [Option<GroupId>; 2],
}

impl TwinOrbits {
    pub fn new() -> Self {
        Self { groups: [None; 2] }
    }

    fn sphere(ctx: &mut SceneContext, radius: f32, color: u32) -> Body {
        let id = ctx.next_body_id();
        Body::new(id, Geometry::sphere(radius, 32, 32), Material::new(Color::from_hex(color)))
    }
}

impl Game for TwinOrbits {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            viewport: Viewport::new(800.0, 500.0),
            camera: CameraConfig {
                fov_deg: 45.0,
                position: Vec3::new(0.0, 0.0, 80.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let moon = Self::sphere(ctx, MOON_RADIUS, AQUA).with_tag("inner-moon");
        let inner = ctx.spawn_orbiter(None, INNER, moon)?;
        let core = Self::sphere(ctx, CORE_RADIUS, AQUA).with_tag("core");
        ctx.spawn_body(Some(inner), core)?;

        let moon = Self::sphere(ctx, MOON_RADIUS, LIME).with_tag("outer-moon");
        let outer = ctx.spawn_orbiter(None, OUTER, moon)?;

        self.groups = [Some(inner), Some(outer)];
        ctx.generate_starfield(&StarfieldConfig::default());
        ctx.controls = Some(OrbitControls::from_camera(&ctx.camera));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (TwinOrbits, SceneContext) {
        let mut game = TwinOrbits::new();
        let mut ctx = SceneContext::new(&game.config());
        game.init(&mut ctx).unwrap();
        ctx.graph.propagate();
        (game, ctx)
    }

    #[test]
    fn groups_turn_at_their_own_rates() {
        let (game, mut ctx) = scene();
        for _ in 0..50 {
            ctx.tick_systems();
        }
        let inner = ctx.graph.rotation(game.groups[0].unwrap()).unwrap();
        let outer = ctx.graph.rotation(game.groups[1].unwrap()).unwrap();
        assert!((inner - 1.0).abs() < 1e-4);
        assert!((outer - 0.5).abs() < 1e-4);
    }

    #[test]
    fn moons_keep_their_radius_and_core_stays_put() {
        let (_, mut ctx) = scene();
        for _ in 0..123 {
            ctx.tick_systems();
        }
        let dist = |tag: &str| ctx.graph.world_position(ctx.bodies.find_by_tag(tag).unwrap()).length();
        assert!((dist("inner-moon") - 20.0).abs() < 1e-3);
        assert!((dist("outer-moon") - 30.0).abs() < 1e-3);
        assert!(dist("core") < 1e-4);
    }

    #[test]
    fn viewport_matches_the_canvas() {
        let (_, ctx) = scene();
        assert_eq!(ctx.viewport, Viewport::new(800.0, 500.0));
        assert!((ctx.camera.aspect - 1.6).abs() < 1e-6);
    }
}

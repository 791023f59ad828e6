//! Solar System: a glowing sun, eight planets on offset circular orbits
//! and a starfield. Clicking the sun or a planet shatters it into a cloud of
//! particles that drifts apart and fades out.

use glam::{Vec2, Vec3};
use starfall_engine::*;

use crate::planets::{self, PLANETS};

// ── Scene layout ─────────────────────────────────────────────────────

const SUN_RADIUS: f32 = 8.0;
const SUN_COLOR: u32 = 0xffa500;
const SUN_EMISSIVE: f32 = 1.5;

/// Translucent shell slightly larger than the sun. Never pickable, so
/// clicks pass through it to the sun.
const GLOW_RADIUS: f32 = 8.5;
const GLOW_COLOR: u32 = 0xff4500;
const GLOW_OPACITY: f32 = 0.2;

const SPHERE_SEGMENTS: u32 = 32;

// ── Orbit rings ──────────────────────────────────────────────────────

/// Every ring shares one color.
const RING_COLOR: u32 = 0x007eff;
/// Screen-space point size (no distance attenuation).
const RING_POINT_SIZE: f32 = 1.0;
const RING_ALPHA: f32 = 0.35;

struct Planet {
    body: BodyId,
    orbit: OrbitDescriptor,
}

pub struct SolarSystem {
    sun: Option<BodyId>,
    planets: Vec<Planet>,
    /// Bodies shattered so far.
    destroyed: u32,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            sun: None,
            planets: Vec::with_capacity(planets::PLANET_COUNT),
            destroyed: 0,
        }
    }

    fn sphere(ctx: &mut SceneContext, radius: f32, material: Material) -> Body {
        let id = ctx.next_body_id();
        Body::new(id, Geometry::sphere(radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS), material)
    }

    fn click(&mut self, ctx: &mut SceneContext, client: Vec2, rect: Rect) {
        let Some(hit) = ctx.pick_at(client, rect) else {
            return;
        };
        let name = match ctx.bodies.get(hit.body) {
            Some(body) => body.tag.clone(),
            None => return,
        };
        if ctx.destroy_body(hit.body).is_some() {
            self.destroyed += 1;
            if self.sun == Some(hit.body) {
                self.sun = None;
            }
            log::info!("{} destroyed ({} so far)", name, self.destroyed);
        }
    }
}

impl Game for SolarSystem {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            camera: CameraConfig {
                fov_deg: 100.0,
                near: 0.1,
                far: 2000.0,
                position: Vec3::new(10.0, 20.0, 50.0),
                target: Vec3::ZERO,
            },
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let sun_material = Material::new(Color::from_hex(SUN_COLOR)).with_emissive(SUN_EMISSIVE);
        let sun = Self::sphere(ctx, SUN_RADIUS, sun_material).with_tag("sun");
        let sun = ctx.spawn_body(None, sun)?;
        ctx.set_pickable(sun)?;
        self.sun = Some(sun);

        let glow_material = Material::translucent(Color::from_hex(GLOW_COLOR), GLOW_OPACITY);
        let glow = Self::sphere(ctx, GLOW_RADIUS, glow_material).with_tag("glow");
        ctx.spawn_body(None, glow)?;

        for (i, spec) in PLANETS.iter().enumerate() {
            let body = Self::sphere(ctx, spec.radius, Material::new(spec.color())).with_tag(format!("planet-{}", i + 1));
            let id = body.id;
            let orbit = spec.orbit();
            ctx.spawn_orbiter(None, orbit, body)?;
            ctx.set_pickable(id)?;
            self.planets.push(Planet { body: id, orbit });
        }

        ctx.generate_starfield(&StarfieldConfig::default());
        ctx.controls = Some(OrbitControls::from_camera(&ctx.camera));

        log::info!("solar-system: sun + {} planets", self.planets.len());
        Ok(())
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) {
        if let InputEvent::PointerClick { client_x, client_y, rect } = *event {
            self.click(ctx, Vec2::new(client_x, client_y), rect);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        let c = Color::from_hex(RING_COLOR);
        // Rings of shattered planets disappear with them
        for planet in self.planets.iter().filter(|p| ctx.scene.bodies.contains(p.body)) {
            ctx.frame.push_points(
                planet.orbit.path_points(ORBIT_SAMPLES).into_iter().map(|p| PointVertex {
                    position: p.to_array(),
                    size: -RING_POINT_SIZE,
                    color: [c.r, c.g, c.b],
                    alpha: RING_ALPHA,
                }),
                None,
                0.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (SolarSystem, SceneContext) {
        let mut game = SolarSystem::new();
        let mut ctx = SceneContext::new(&game.config());
        game.init(&mut ctx).unwrap();
        ctx.graph.propagate();
        (game, ctx)
    }

    fn click_center(game: &mut SolarSystem, ctx: &mut SceneContext) {
        let rect = Rect::new(0.0, 0.0, ctx.viewport.width, ctx.viewport.height);
        let event = InputEvent::PointerClick {
            client_x: rect.width / 2.0,
            client_y: rect.height / 2.0,
            rect,
        };
        game.handle_input(ctx, &event);
    }

    #[test]
    fn init_builds_sun_glow_and_planets() {
        let (game, ctx) = scene();
        assert_eq!(ctx.bodies.len(), 2 + planets::PLANET_COUNT);
        assert_eq!(ctx.orbits.len(), planets::PLANET_COUNT);
        // Glow is the only body that cannot be picked
        assert_eq!(ctx.pickables.len(), 1 + planets::PLANET_COUNT);
        let glow = ctx.bodies.find_by_tag("glow").unwrap();
        assert!(!ctx.pickables.contains(glow.id));
        assert!(game.sun.is_some());
        assert_eq!(ctx.starfield.as_ref().unwrap().len(), 1000);
    }

    #[test]
    fn fastest_planet_sweeps_the_largest_angle() {
        let (_, mut ctx) = scene();
        for _ in 0..100 {
            ctx.tick_systems();
        }
        let angles: Vec<f32> = ctx
            .orbits
            .iter()
            .map(|(group, _)| ctx.graph.rotation(*group).unwrap())
            .collect();
        assert!((angles[0] - 3.0).abs() < 1e-3);
        for pair in angles.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn clicking_the_sun_through_the_glow_destroys_it() {
        let (mut game, mut ctx) = scene();
        let sun = game.sun.unwrap();
        click_center(&mut game, &mut ctx);

        assert!(!ctx.bodies.contains(sun));
        assert!(ctx.bodies.find_by_tag("glow").is_some());
        assert_eq!(ctx.destruction.len(), 1);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, GameEvent::BODY_DESTROYED);
        assert_eq!(game.destroyed, 1);
        assert!(game.sun.is_none());
    }

    #[test]
    fn clicking_empty_sky_does_nothing() {
        let (mut game, mut ctx) = scene();
        let rect = Rect::new(0.0, 0.0, ctx.viewport.width, ctx.viewport.height);
        let event = InputEvent::PointerClick {
            client_x: 0.0,
            client_y: 0.0,
            rect,
        };
        game.handle_input(&mut ctx, &event);
        assert_eq!(ctx.bodies.len(), 2 + planets::PLANET_COUNT);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn destroyed_planet_loses_its_ring() {
        let (game, mut ctx) = scene();
        let mut frame = FrameBuffers::new();
        game.render(&mut RenderContext {
            scene: &ctx,
            frame: &mut frame,
        });
        assert_eq!(frame.batch_count() as usize, planets::PLANET_COUNT);
        assert_eq!(frame.point_count() as usize, planets::PLANET_COUNT * ORBIT_SAMPLES);

        ctx.destroy_body(game.planets[0].body);
        let mut frame = FrameBuffers::new();
        game.render(&mut RenderContext {
            scene: &ctx,
            frame: &mut frame,
        });
        assert_eq!(frame.batch_count() as usize, planets::PLANET_COUNT - 1);
    }

    #[test]
    fn every_ring_uses_the_shared_color() {
        let (game, ctx) = scene();
        let mut frame = FrameBuffers::new();
        game.render(&mut RenderContext {
            scene: &ctx,
            frame: &mut frame,
        });
        let c = Color::from_hex(RING_COLOR);
        assert!(!frame.points.is_empty());
        for p in &frame.points {
            assert_eq!(p.color, [c.r, c.g, c.b]);
        }
    }

    #[test]
    fn particles_fade_out_after_a_click() {
        let (mut game, mut ctx) = scene();
        click_center(&mut game, &mut ctx);
        let lifetime = ctx.destruction.config.lifetime_ticks();
        for _ in 0..=lifetime {
            ctx.tick_systems();
        }
        assert!(ctx.destruction.is_empty());
    }
}

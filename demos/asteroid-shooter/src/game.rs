//! Asteroid Shooter: a box ship fires red rounds down -Z at grey asteroids
//! drifting toward the camera.
//!
//! Arrow keys nudge the ship, space fires. The ship is a scene body;
//! asteroids and rounds live in the shooter loop and are drawn in `render`.

use glam::{Quat, Vec3};
use starfall_engine::*;

const SHIP_COLOR: u32 = 0x00ff00;
const ASTEROID_COLOR: u32 = 0x888888;
const PROJECTILE_COLOR: u32 = 0xff0000;

pub struct AsteroidShooter {
    shooter: ShooterLoop,
    ship: Option<BodyId>,
    score: u32,
}

impl AsteroidShooter {
    pub fn new() -> Self {
        Self::with_config(ShooterConfig::default())
    }

    pub fn with_config(config: ShooterConfig) -> Self {
        Self {
            shooter: ShooterLoop::new(config),
            ship: None,
            score: 0,
        }
    }

    /// Keep the ship body on the shooter's ship position.
    fn sync_ship(&self, ctx: &mut SceneContext) {
        if let Some(body) = self.ship.and_then(|id| ctx.bodies.get_mut(id)) {
            body.position = self.shooter.ship;
        }
    }
}

fn sphere_instance(position: Vec3, radius: f32, color: u32) -> MeshInstance {
    let c = Color::from_hex(color);
    MeshInstance {
        position: position.to_array(),
        shape: MeshInstance::SHAPE_SPHERE,
        rotation: Quat::IDENTITY.to_array(),
        extents: [radius; 3],
        emissive: 0.0,
        color: [c.r, c.g, c.b],
        alpha: 1.0,
    }
}

impl Game for AsteroidShooter {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            camera: CameraConfig {
                fov_deg: 100.0,
                position: Vec3::new(0.0, 0.0, 5.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let id = ctx.next_body_id();
        let ship = Body::new(id, Geometry::cuboid(1.0, 1.0, 2.0), Material::new(Color::from_hex(SHIP_COLOR)))
            .with_tag("ship")
            .with_position(self.shooter.ship);
        self.ship = Some(ctx.spawn_body(None, ship)?);
        self.shooter.init(&mut ctx.rng);
        Ok(())
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) {
        if let InputEvent::KeyDown { key } = *event {
            if self.shooter.handle_key(key) {
                self.sync_ship(ctx);
            }
        }
    }

    fn update(&mut self, ctx: &mut SceneContext) {
        for hit in self.shooter.tick(&mut ctx.rng) {
            self.score += 1;
            ctx.emit_event(GameEvent {
                kind: GameEvent::ASTEROID_HIT,
                a: hit.asteroid.0 as f32,
                b: hit.projectile.0 as f32,
                c: self.score as f32,
            });
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        for a in self.shooter.asteroids() {
            ctx.frame.push_mesh(sphere_instance(a.position, a.radius, ASTEROID_COLOR));
        }
        let radius = self.shooter.config.projectile_radius;
        for p in self.shooter.projectiles() {
            ctx.frame.push_mesh(sphere_instance(p.position, radius, PROJECTILE_COLOR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(config: ShooterConfig) -> (AsteroidShooter, SceneContext) {
        let mut game = AsteroidShooter::with_config(config);
        let mut ctx = SceneContext::new(&game.config());
        game.init(&mut ctx).unwrap();
        (game, ctx)
    }

    fn press(game: &mut AsteroidShooter, ctx: &mut SceneContext, key: Key) {
        game.handle_input(ctx, &InputEvent::KeyDown { key });
    }

    #[test]
    fn init_spawns_ship_and_field() {
        let (game, ctx) = scene(ShooterConfig::default());
        assert_eq!(game.shooter.asteroids().len(), 5);
        assert!(game.shooter.projectiles().is_empty());
        let ship = ctx.bodies.find_by_tag("ship").unwrap();
        assert_eq!(ship.geometry.half_extents(), Vec3::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn arrow_keys_move_the_ship_body() {
        let (mut game, mut ctx) = scene(ShooterConfig::default());
        press(&mut game, &mut ctx, Key::ArrowUp);
        press(&mut game, &mut ctx, Key::ArrowRight);
        let ship = ctx.bodies.find_by_tag("ship").unwrap();
        assert!((ship.position.y + 0.1).abs() < 1e-6);
        assert!((ship.position.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn hit_emits_event_and_clears_pair() {
        let config = ShooterConfig {
            asteroid_count: 0,
            ..Default::default()
        };
        let (mut game, mut ctx) = scene(config);
        let asteroid = game.shooter.spawn_asteroid(Vec3::new(0.0, 0.0, -0.5), 1.0);
        press(&mut game, &mut ctx, Key::Space);
        game.update(&mut ctx);

        assert!(game.shooter.asteroids().is_empty());
        assert!(game.shooter.projectiles().is_empty());
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, GameEvent::ASTEROID_HIT);
        assert_eq!(ctx.events[0].a, asteroid.0 as f32);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn render_draws_every_asteroid_and_round() {
        let (mut game, mut ctx) = scene(ShooterConfig::default());
        press(&mut game, &mut ctx, Key::Space);
        press(&mut game, &mut ctx, Key::Space);
        let mut frame = FrameBuffers::new();
        game.render(&mut RenderContext {
            scene: &ctx,
            frame: &mut frame,
        });
        assert_eq!(frame.mesh_count(), 7);
        let round = frame.meshes[5];
        assert_eq!(round.extents, [0.1; 3]);
        assert_eq!(round.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn unrelated_keys_leave_the_ship_alone() {
        let (mut game, mut ctx) = scene(ShooterConfig::default());
        press(&mut game, &mut ctx, Key::Other(65));
        assert_eq!(ctx.bodies.find_by_tag("ship").unwrap().position, Vec3::ZERO);
        assert!(game.shooter.projectiles().is_empty());
    }
}

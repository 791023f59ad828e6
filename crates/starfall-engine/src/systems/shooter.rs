//! On-rails asteroid shooter: asteroids drift toward the camera, the ship
//! fires projectiles away from it, and close pairs annihilate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::types::EntityId;
use crate::input::queue::Key;
use crate::systems::effects::rng::RandomSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub asteroid_count: usize,
    /// Asteroids spawn and respawn with coordinates in `[-extent, extent]`.
    pub spawn_extent: f32,
    pub asteroid_radius_min: f32,
    pub asteroid_radius_max: f32,
    /// +z per tick.
    pub asteroid_speed: f32,
    /// Asteroids past `z > wrap_bound` reappear at `z = -wrap_bound`.
    pub wrap_bound: f32,
    /// -z per tick.
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Projectiles with `|z|` beyond this are dropped.
    pub despawn_distance: f32,
    /// Ship movement per key press.
    pub ship_step: f32,
    /// Pairs closer than this collide.
    pub hit_distance: f32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 5,
            spawn_extent: 5.0,
            asteroid_radius_min: 0.5,
            asteroid_radius_max: 1.5,
            asteroid_speed: 0.05,
            wrap_bound: 5.0,
            projectile_speed: 0.2,
            projectile_radius: 0.1,
            despawn_distance: 50.0,
            ship_step: 0.1,
            hit_distance: 1.0,
        }
    }
}

impl ShooterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.asteroid_radius_min > config.asteroid_radius_max {
            return Err(ConfigError::Invalid(format!(
                "asteroid radius range [{}, {}] is empty",
                config.asteroid_radius_min, config.asteroid_radius_max
            )));
        }
        if config.despawn_distance <= 0.0 {
            return Err(ConfigError::Invalid("despawn_distance must be positive".into()));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub id: EntityId,
    pub position: Vec3,
    /// Visual radius only; collisions use the fixed hit distance.
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
}

/// A projectile/asteroid pair removed in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterHit {
    pub asteroid: EntityId,
    pub projectile: EntityId,
}

pub struct ShooterLoop {
    pub config: ShooterConfig,
    pub ship: Vec3,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl ShooterLoop {
    pub fn new(config: ShooterConfig) -> Self {
        Self {
            config,
            ship: Vec3::ZERO,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn the initial asteroid field.
    pub fn init(&mut self, rng: &mut impl RandomSource) {
        let e = self.config.spawn_extent;
        for _ in 0..self.config.asteroid_count {
            let position = Vec3::new(rng.range(-e, e), rng.range(-e, e), rng.range(-e, e));
            let radius = rng.range(self.config.asteroid_radius_min, self.config.asteroid_radius_max);
            self.spawn_asteroid(position, radius);
        }
        log::info!("shooter: {} asteroids spawned", self.asteroids.len());
    }

    pub fn spawn_asteroid(&mut self, position: Vec3, radius: f32) -> EntityId {
        let id = self.alloc_id();
        self.asteroids.push(Asteroid { id, position, radius });
        id
    }

    /// Fire a projectile from the ship's current position.
    pub fn fire(&mut self) -> EntityId {
        let id = self.alloc_id();
        self.projectiles.push(Projectile {
            id,
            position: self.ship,
        });
        id
    }

    /// Apply a key press. Returns true if the key did anything.
    ///
    /// The vertical keys are inverted relative to screen space: ArrowUp
    /// lowers the ship and ArrowDown raises it.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let step = self.config.ship_step;
        match key {
            Key::ArrowUp => self.ship.y -= step,
            Key::ArrowDown => self.ship.y += step,
            Key::ArrowLeft => self.ship.x -= step,
            Key::ArrowRight => self.ship.x += step,
            Key::Space => {
                self.fire();
            }
            Key::Other(_) => return false,
        }
        true
    }

    /// One tick: move, wrap, collide, despawn. Returns every pair that was in
    /// range; an entity may appear in several.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> Vec<ShooterHit> {
        let cfg = &self.config;
        let e = cfg.spawn_extent;

        for a in &mut self.asteroids {
            a.position.z += cfg.asteroid_speed;
            if a.position.z > cfg.wrap_bound {
                a.position.z = -cfg.wrap_bound;
                a.position.x = rng.range(-e, e);
                a.position.y = rng.range(-e, e);
            }
        }

        for p in &mut self.projectiles {
            p.position.z -= cfg.projectile_speed;
        }

        // Every pair is tested against the positions at the start of the
        // pass; removal waits until the pass is done.
        let mut hits = Vec::new();
        let mut dead_asteroids = vec![false; self.asteroids.len()];
        let mut dead_projectiles = vec![false; self.projectiles.len()];
        for (pi, p) in self.projectiles.iter().enumerate() {
            for (ai, a) in self.asteroids.iter().enumerate() {
                if p.position.distance(a.position) < cfg.hit_distance {
                    dead_asteroids[ai] = true;
                    dead_projectiles[pi] = true;
                    hits.push(ShooterHit {
                        asteroid: a.id,
                        projectile: p.id,
                    });
                }
            }
        }

        let mut idx = 0;
        self.asteroids.retain(|_| {
            idx += 1;
            !dead_asteroids[idx - 1]
        });
        let mut idx = 0;
        let bound = cfg.despawn_distance;
        self.projectiles.retain(|p| {
            idx += 1;
            !dead_projectiles[idx - 1] && p.position.z.abs() <= bound
        });

        for hit in &hits {
            log::debug!("shooter: projectile {:?} destroyed asteroid {:?}", hit.projectile, hit.asteroid);
        }
        hits
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

impl Default for ShooterLoop {
    fn default() -> Self {
        Self::new(ShooterConfig::default())
    }
}

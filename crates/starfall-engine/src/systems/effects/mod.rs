//! Destruction effect: turns picked bodies into fading particle clouds.
//!
//! The registry owns every live `ParticleSystem` exclusively. A system is
//! created by `spawn`, aged by `tick`, and dropped in the same tick its
//! shared opacity reaches zero, so an expired system is never ticked again.

pub mod particle;
pub mod rng;

use glam::Affine3A;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::types::ParticleSystemId;
use crate::components::body::Body;
use crate::components::material::{Color, Material};

pub use particle::ParticleSystem;
pub use rng::{RandomSource, Rng};

/// Tuning for explosion clouds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructionConfig {
    /// Per-tick position step: `position += velocity * step_scale`.
    pub step_scale: f32,
    /// Opacity removed from each system per tick.
    pub fade_decrement: f32,
    /// Opacity a new cloud starts at.
    pub initial_opacity: f32,
    pub color: Color,
    pub point_size: f32,
}

impl Default for DestructionConfig {
    fn default() -> Self {
        Self {
            step_scale: 0.1,
            fade_decrement: 0.01,
            initial_opacity: 1.0,
            color: Color::from_hex(0xff6600),
            point_size: 0.1,
        }
    }
}

impl DestructionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.fade_decrement <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fade_decrement must be positive, got {}",
                config.fade_decrement
            )));
        }
        Ok(config)
    }

    /// Ticks a cloud survives: the first tick at which cumulative decay
    /// reaches the initial opacity.
    pub fn lifetime_ticks(&self) -> u32 {
        (self.initial_opacity / self.fade_decrement).ceil() as u32
    }
}

/// Registry of active particle systems for one scene.
pub struct DestructionEffect {
    pub config: DestructionConfig,
    systems: Vec<ParticleSystem>,
    next_id: u32,
}

impl DestructionEffect {
    pub fn new(config: DestructionConfig) -> Self {
        Self {
            config,
            systems: Vec::new(),
            next_id: 1,
        }
    }

    /// Clone `body`'s vertices (moved to world space by `world`) into a new
    /// fading cloud with one random velocity per vertex and register it.
    ///
    /// Removing the body from the render set is the caller's job
    /// (see `SceneContext::destroy_body`).
    pub fn spawn(&mut self, body: &Body, world: Affine3A, rng: &mut impl RandomSource) -> ParticleSystemId {
        let id = ParticleSystemId(self.next_id);
        self.next_id += 1;

        let material = Material::translucent(self.config.color, self.config.initial_opacity);
        let system = ParticleSystem::from_vertices(
            id,
            body.id,
            &body.geometry.vertices(),
            world,
            material,
            self.config.point_size,
            rng,
        );
        log::debug!(
            "destruction: body {:?} -> particle system {:?} ({} points)",
            body.id,
            id,
            system.len()
        );
        self.systems.push(system);
        id
    }

    /// Advance every system by `velocity * step_scale`, fade it, and drop the
    /// ones whose opacity reached zero. Returns how many were dropped.
    pub fn tick(&mut self, step_scale: f32) -> usize {
        let decay = self.config.fade_decrement;
        let before = self.systems.len();
        self.systems.retain_mut(|s| {
            let alive = s.tick(step_scale, decay);
            if !alive {
                log::debug!("destruction: particle system {:?} faded out", s.id);
            }
            alive
        });
        before - self.systems.len()
    }

    /// Drop a system early. Missing ids are a no-op.
    pub fn remove(&mut self, id: ParticleSystemId) -> Option<ParticleSystem> {
        match self.systems.iter().position(|s| s.id == id) {
            Some(idx) => Some(self.systems.remove(idx)),
            None => {
                log::trace!("destruction: remove of unknown system {:?} ignored", id);
                None
            }
        }
    }

    pub fn get(&self, id: ParticleSystemId) -> Option<&ParticleSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ParticleSystemId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleSystem> {
        self.systems.iter()
    }

    /// Total live points across all systems.
    pub fn point_count(&self) -> usize {
        self.systems.iter().map(|s| s.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for DestructionEffect {
    fn default() -> Self {
        Self::new(DestructionConfig::default())
    }
}

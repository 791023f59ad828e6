//! Procedural static starfield.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::assets::registry::TextureId;
use crate::components::material::Color;
use crate::systems::effects::rng::RandomSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars fill, centered on the origin.
    pub extent: f32,
    pub size: f32,
    pub size_attenuation: bool,
    pub color: Color,
    /// Sprite texture path, requested from the host when the field is generated.
    pub texture: Option<String>,
    /// Fragments with alpha below this are discarded.
    pub alpha_test: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 2000.0,
            size: 1.0,
            size_attenuation: true,
            color: Color::WHITE,
            texture: Some("textures/circle.png".to_string()),
            alpha_test: 0.5,
        }
    }
}

impl StarfieldConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.extent < 0.0 {
            return Err(ConfigError::Invalid(format!("starfield extent {} is negative", config.extent)));
        }
        Ok(config)
    }
}

/// How a point cloud is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMaterial {
    pub color: Color,
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    pub texture: Option<TextureId>,
    pub alpha_test: f32,
}

/// Static set of points sharing one material.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub material: PointMaterial,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Scatter `config.count` stars uniformly in the cube
/// `[-extent/2, extent/2]^3`. Generated once; the cloud never changes.
pub fn generate(config: &StarfieldConfig, texture: Option<TextureId>, rng: &mut impl RandomSource) -> PointCloud {
    let half = config.extent * 0.5;
    let positions = (0..config.count)
        .map(|_| {
            Vec3::new(
                rng.range(-half, half),
                rng.range(-half, half),
                rng.range(-half, half),
            )
        })
        .collect();
    log::debug!("starfield: {} stars in a {} cube", config.count, config.extent);
    PointCloud {
        positions,
        material: PointMaterial {
            color: config.color,
            size: config.size,
            size_attenuation: config.size_attenuation,
            texture,
            alpha_test: config.alpha_test,
        },
    }
}

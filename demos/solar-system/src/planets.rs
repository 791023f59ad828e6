//! Planet table for the solar system scene.
//!
//! Orbit centers are pushed out along +X so the rings do not share one
//! center. Speeds are radians per tick and strictly decrease outward.

use glam::Vec3;
use starfall_engine::{Color, OrbitDescriptor};

pub const PLANET_COUNT: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct PlanetSpec {
    pub radius: f32,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub orbit_radius: f32,
    pub speed: f32,
    /// Orbit center along X.
    pub offset_x: f32,
}

impl PlanetSpec {
    const fn new(radius: f32, color: u32, orbit_radius: f32, speed: f32, offset_x: f32) -> Self {
        Self {
            radius,
            color,
            orbit_radius,
            speed,
            offset_x,
        }
    }

    pub fn orbit(&self) -> OrbitDescriptor {
        OrbitDescriptor::new(self.orbit_radius, self.speed, Vec3::new(self.offset_x, 0.0, 0.0))
    }

    pub fn color(&self) -> Color {
        Color::from_hex(self.color)
    }
}

pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec::new(2.0, 0x8888ff, 15.0, 0.03, 2.0),
    PlanetSpec::new(3.0, 0x00ff00, 25.0, 0.02, 7.0),
    PlanetSpec::new(4.0, 0xff0000, 40.0, 0.01, 15.0),
    PlanetSpec::new(2.5, 0xffa500, 60.0, 0.005, 30.0),
    PlanetSpec::new(5.0, 0x8888ff, 80.0, 0.003, 45.0),
    PlanetSpec::new(2.5, 0x00ff00, 100.0, 0.002, 58.0),
    PlanetSpec::new(4.0, 0xff0000, 130.0, 0.001, 78.0),
    PlanetSpec::new(2.0, 0xffa500, 160.0, 0.0007, 100.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_strictly_decrease_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].speed > pair[1].speed);
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }

    #[test]
    fn orbit_descriptor_carries_offset() {
        let d = PLANETS[2].orbit();
        assert_eq!(d.radius, 40.0);
        assert_eq!(d.center_offset, Vec3::new(15.0, 0.0, 0.0));
    }
}

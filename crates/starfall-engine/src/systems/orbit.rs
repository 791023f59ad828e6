//! Circular orbits driven by pivot-group rotation.
//!
//! A body orbits by hanging off a pivot group at `x = radius`; spinning the
//! group sweeps it around the group's origin. Speeds are radians per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;
use crate::api::types::GroupId;
use crate::components::body::Body;
use crate::core::scene::BodyStore;
use crate::extensions::transform::TransformGraph;

/// Default sample count for orbit rings.
pub const ORBIT_SAMPLES: usize = 96;

/// Static description of one circular orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitDescriptor {
    pub radius: f32,
    /// Radians added to the owning group's angle every tick.
    pub speed: f32,
    /// Where the orbit is centered, relative to the parent.
    #[serde(default)]
    pub center_offset: Vec3,
}

impl OrbitDescriptor {
    pub fn new(radius: f32, speed: f32, center_offset: Vec3) -> Self {
        Self {
            radius,
            speed,
            center_offset,
        }
    }

    /// Closed ring of `samples` points in the XZ plane around the center.
    /// The first point sits where an orbiter starts (`angle = 0`).
    pub fn path_points(&self, samples: usize) -> Vec<Vec3> {
        (0..samples)
            .map(|i| {
                let a = i as f32 / samples as f32 * std::f32::consts::TAU;
                // Rotation about +Y takes +X toward -Z.
                self.center_offset + Vec3::new(a.cos(), 0.0, -a.sin()) * self.radius
            })
            .collect()
    }
}

/// Advances every registered orbit by one tick.
#[derive(Debug, Default)]
pub struct OrbitDriver {
    orbits: Vec<(GroupId, OrbitDescriptor)>,
}

impl OrbitDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive an existing group with `descriptor`.
    pub fn register(&mut self, group: GroupId, descriptor: OrbitDescriptor) {
        self.orbits.push((group, descriptor));
    }

    /// Create a group at the descriptor's center offset (under `parent`),
    /// place `body` at `x = radius` inside it, and register the orbit.
    pub fn spawn_orbiter(
        &mut self,
        graph: &mut TransformGraph,
        store: &mut BodyStore,
        parent: Option<GroupId>,
        descriptor: OrbitDescriptor,
        body: Body,
    ) -> Result<GroupId, SceneError> {
        // Validate before creating the group so a failure leaves no orphan
        if graph.is_attached(body.id) {
            return Err(SceneError::AlreadyAttached(body.id));
        }
        let group = graph.create_group(parent, descriptor.center_offset)?;
        let body = body.with_position(Vec3::new(descriptor.radius, 0.0, 0.0));
        graph.attach(Some(group), body.id)?;
        store.spawn(body);
        self.register(group, descriptor);
        Ok(group)
    }

    /// One tick: `angle += speed` on every driven group.
    pub fn tick(&self, graph: &mut TransformGraph) {
        for (group, orbit) in &self.orbits {
            if graph.rotate_by(*group, orbit.speed).is_err() {
                log::trace!("orbit: group {:?} no longer exists", group);
            }
        }
    }

    pub fn descriptor(&self, group: GroupId) -> Option<&OrbitDescriptor> {
        self.orbits.iter().find(|(g, _)| *g == group).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(GroupId, OrbitDescriptor)> {
        self.orbits.iter()
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;
    use crate::components::geometry::Geometry;
    use crate::components::material::{Color, Material};

    fn planet(id: u32) -> Body {
        Body::new(BodyId(id), Geometry::sphere(1.0, 8, 8), Material::new(Color::WHITE))
    }

    #[test]
    fn angle_is_speed_times_ticks() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        let slow = driver
            .spawn_orbiter(&mut graph, &mut store, None, OrbitDescriptor::new(10.0, 0.25, Vec3::ZERO), planet(1))
            .unwrap();
        let fast = driver
            .spawn_orbiter(&mut graph, &mut store, None, OrbitDescriptor::new(20.0, 0.5, Vec3::ZERO), planet(2))
            .unwrap();

        for _ in 0..12 {
            driver.tick(&mut graph);
        }
        assert_eq!(graph.rotation(slow), Some(3.0));
        assert_eq!(graph.rotation(fast), Some(6.0));
    }

    #[test]
    fn spawn_orbiter_places_body_on_ring() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        let orbit = OrbitDescriptor::new(15.0, 0.03, Vec3::new(2.0, 0.0, 0.0));
        driver.spawn_orbiter(&mut graph, &mut store, None, orbit, planet(1)).unwrap();

        for _ in 0..40 {
            driver.tick(&mut graph);
            graph.propagate();
            let p = graph.world_position(store.get(BodyId(1)).unwrap());
            assert!(((p - orbit.center_offset).length() - 15.0).abs() < 1e-3);
        }
    }

    #[test]
    fn spawn_orbiter_rejects_unknown_parent() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        let err = driver
            .spawn_orbiter(&mut graph, &mut store, Some(GroupId(9)), OrbitDescriptor::new(1.0, 0.1, Vec3::ZERO), planet(1))
            .unwrap_err();
        assert_eq!(err, SceneError::UnknownGroup(GroupId(9)));
        assert!(driver.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn spawn_orbiter_rejects_attached_body_without_leaving_a_group() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        graph.attach(None, BodyId(1)).unwrap();
        let groups = graph.len();
        let err = driver
            .spawn_orbiter(&mut graph, &mut store, None, OrbitDescriptor::new(1.0, 0.1, Vec3::ZERO), planet(1))
            .unwrap_err();
        assert_eq!(err, SceneError::AlreadyAttached(BodyId(1)));
        assert_eq!(graph.len(), groups);
        assert!(driver.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn path_points_lie_on_the_ring() {
        let orbit = OrbitDescriptor::new(40.0, 0.01, Vec3::new(15.0, 0.0, 0.0));
        let points = orbit.path_points(ORBIT_SAMPLES);
        assert_eq!(points.len(), ORBIT_SAMPLES);
        assert!((points[0] - Vec3::new(55.0, 0.0, 0.0)).length() < 1e-4);
        for p in &points {
            assert!(((*p - orbit.center_offset).length() - 40.0).abs() < 1e-3);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn ring_matches_orbiter_direction() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        let samples = 4;
        let step = std::f32::consts::TAU / samples as f32;
        let orbit = OrbitDescriptor::new(10.0, step, Vec3::ZERO);
        driver.spawn_orbiter(&mut graph, &mut store, None, orbit, planet(1)).unwrap();
        driver.tick(&mut graph);
        graph.propagate();
        let p = graph.world_position(store.get(BodyId(1)).unwrap());
        assert!((p - orbit.path_points(samples)[1]).length() < 1e-3);
    }

    #[test]
    fn faster_orbits_traverse_larger_angles() {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let mut driver = OrbitDriver::new();
        let speeds = [0.03, 0.02, 0.01, 0.005, 0.003, 0.002, 0.001, 0.0007];
        let groups: Vec<GroupId> = speeds
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let orbit = OrbitDescriptor::new(15.0 + 10.0 * i as f32, s, Vec3::ZERO);
                driver.spawn_orbiter(&mut graph, &mut store, None, orbit, planet(i as u32)).unwrap()
            })
            .collect();

        for ticks in [1, 17, 250] {
            for _ in 0..ticks {
                driver.tick(&mut graph);
            }
            let angles: Vec<f32> = groups.iter().map(|g| graph.rotation(*g).unwrap()).collect();
            assert!(angles.windows(2).all(|w| w[0] > w[1]), "{angles:?}");
        }
    }
}

//! Pointer picking: screen click → camera ray → nearest pickable body.
//!
//! Picking only reads scene state. What happens to the hit body is up to
//! the caller (the solar system hands it to the destruction effect).

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::core::scene::BodyStore;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::Rect;
use crate::renderer::camera::{PerspectiveCamera, Ray};

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Bodies eligible for ray tests.
#[derive(Debug, Clone, Default)]
pub struct PickableSet {
    bodies: BTreeSet<BodyId>,
}

impl PickableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: BodyId) -> bool {
        self.bodies.insert(body)
    }

    pub fn remove(&mut self, body: BodyId) -> bool {
        self.bodies.remove(&body)
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.bodies.contains(&body)
    }

    pub fn iter(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    /// Distance along the (unit) ray.
    pub t: f32,
    pub point: Vec3,
}

/// Client pixel coordinates → normalized device coordinates (+y up).
pub fn normalize_pointer(client_x: f32, client_y: f32, rect: Rect, viewport: Viewport) -> Vec2 {
    Vec2::new(
        ((client_x - rect.left) / viewport.width) * 2.0 - 1.0,
        -((client_y - rect.top) / viewport.height) * 2.0 + 1.0,
    )
}

/// Nearest pickable body hit by `ray`.
///
/// Each body is tested in its own local space so rotated and scaled shapes
/// intersect exactly. Ids missing from the store are skipped.
pub fn cast_ray(ray: &Ray, pickables: &PickableSet, graph: &TransformGraph, store: &BodyStore) -> Option<PickHit> {
    let mut nearest: Option<PickHit> = None;
    for id in pickables.iter() {
        let Some(body) = store.get(id) else {
            continue;
        };
        if !body.visible {
            continue;
        }
        let inv = graph.world_matrix(body).inverse();
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.direction);
        let Some(t) = body.geometry.intersect_local(origin, dir) else {
            continue;
        };
        if nearest.map_or(true, |n| t < n.t) {
            nearest = Some(PickHit {
                body: id,
                t,
                point: ray.at(t),
            });
        }
    }
    nearest
}

/// Resolve a click to the nearest pickable body under it.
pub fn pick(
    client: Vec2,
    rect: Rect,
    viewport: Viewport,
    camera: &PerspectiveCamera,
    pickables: &PickableSet,
    graph: &TransformGraph,
    store: &BodyStore,
) -> Option<PickHit> {
    if pickables.is_empty() {
        return None;
    }
    let ndc = normalize_pointer(client.x, client.y, rect, viewport);
    let ray = camera.ray_from_ndc(ndc);
    let hit = cast_ray(&ray, pickables, graph, store);
    match &hit {
        Some(h) => log::debug!("pick: {client} hit {:?} at t={:.3}", h.body, h.t),
        None => log::trace!("pick: {client} hit nothing"),
    }
    hit
}

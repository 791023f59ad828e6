use crate::api::types::BodyId;
use crate::components::body::Body;

/// Flat storage for the bodies of one scene.
/// Designed for small body counts (tens to hundreds).
pub struct BodyStore {
    bodies: Vec<Body>,
}

impl BodyStore {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(64),
        }
    }

    /// Add a body to the render set.
    pub fn spawn(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// Remove a body by ID. Returns the removed body if it was present.
    pub fn despawn(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        // Keep insertion order so the frame layout is stable.
        Some(self.bodies.remove(idx))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Find the first body with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

impl Default for BodyStore {
    fn default() -> Self {
        Self::new()
    }
}

// extensions/transform.rs
//
// Pivot-group hierarchy. Groups offset and rotate their children as a rigid
// unit; bodies hang off a group (or the scene root) and are never re-parented.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   let orbit = graph.create_group(None, Vec3::new(2.0, 0.0, 0.0))?;
//   graph.attach(Some(orbit), planet_id)?;
//   graph.rotate_by(orbit, 0.03)?;
//   let world = graph.world_matrix(&planet);

use std::collections::HashMap;

use glam::{Affine3A, Quat, Vec3};

use crate::api::error::SceneError;
use crate::api::types::{BodyId, GroupId};
use crate::components::body::Body;

/// A transform node: offset from its parent plus a rotation about `axis`.
#[derive(Debug, Clone)]
pub struct PivotGroup {
    parent: Option<GroupId>,
    offset: Vec3,
    axis: Vec3,
    angle: f32,
    children: Vec<GroupId>,
    bodies: Vec<BodyId>,
}

impl PivotGroup {
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Accumulated rotation angle in radians (never wrapped).
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    fn local_matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(Quat::from_axis_angle(self.axis, self.angle), self.offset)
    }
}

/// Pivot-group hierarchy for one scene.
///
/// A group's parent is fixed when the group is created and must already
/// exist, so the graph can never contain a cycle. Groups are stored in
/// creation order, which is also a valid parent-before-child order.
#[derive(Debug, Default)]
pub struct TransformGraph {
    groups: Vec<PivotGroup>,
    /// Parent of every attached body (`None` = scene root).
    body_parents: HashMap<BodyId, Option<GroupId>>,
    /// Cached world matrix per group, valid when `dirty` is false.
    world: Vec<Affine3A>,
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group rotating about the Y axis.
    pub fn create_group(&mut self, parent: Option<GroupId>, offset: Vec3) -> Result<GroupId, SceneError> {
        self.create_group_with_axis(parent, offset, Vec3::Y)
    }

    /// Create a group rotating about an arbitrary axis (normalized here).
    pub fn create_group_with_axis(
        &mut self,
        parent: Option<GroupId>,
        offset: Vec3,
        axis: Vec3,
    ) -> Result<GroupId, SceneError> {
        if let Some(p) = parent {
            if self.group(p).is_none() {
                return Err(SceneError::UnknownGroup(p));
            }
        }

        let id = GroupId(self.groups.len() as u32);
        self.groups.push(PivotGroup {
            parent,
            offset,
            axis: axis.try_normalize().unwrap_or(Vec3::Y),
            angle: 0.0,
            children: Vec::new(),
            bodies: Vec::new(),
        });
        if let Some(p) = parent {
            self.groups[p.0 as usize].children.push(id);
        }
        self.dirty = true;
        Ok(id)
    }

    /// Attach a body to a group (`None` = scene root). A body can be attached once.
    pub fn attach(&mut self, group: Option<GroupId>, body: BodyId) -> Result<(), SceneError> {
        if self.body_parents.contains_key(&body) {
            return Err(SceneError::AlreadyAttached(body));
        }
        if let Some(g) = group {
            let node = self.group_mut(g).ok_or(SceneError::UnknownGroup(g))?;
            node.bodies.push(body);
        }
        self.body_parents.insert(body, group);
        Ok(())
    }

    /// Detach a body from the hierarchy. Returns false if it was not attached.
    pub fn detach(&mut self, body: BodyId) -> bool {
        let Some(parent) = self.body_parents.remove(&body) else {
            return false;
        };
        if let Some(g) = parent {
            if let Some(node) = self.group_mut(g) {
                node.bodies.retain(|&b| b != body);
            }
        }
        true
    }

    /// Set a group's rotation angle.
    pub fn set_rotation(&mut self, group: GroupId, angle: f32) -> Result<(), SceneError> {
        let node = self.group_mut(group).ok_or(SceneError::UnknownGroup(group))?;
        node.angle = angle;
        self.dirty = true;
        Ok(())
    }

    /// Add `delta` to a group's rotation angle.
    pub fn rotate_by(&mut self, group: GroupId, delta: f32) -> Result<(), SceneError> {
        let node = self.group_mut(group).ok_or(SceneError::UnknownGroup(group))?;
        node.angle += delta;
        self.dirty = true;
        Ok(())
    }

    pub fn group(&self, id: GroupId) -> Option<&PivotGroup> {
        self.groups.get(id.0 as usize)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut PivotGroup> {
        self.groups.get_mut(id.0 as usize)
    }

    /// Current rotation angle of a group.
    pub fn rotation(&self, id: GroupId) -> Option<f32> {
        self.group(id).map(|g| g.angle)
    }

    /// Parent of an attached body. Outer `None` = not attached,
    /// `Some(None)` = attached to the scene root.
    pub fn parent_of(&self, body: BodyId) -> Option<Option<GroupId>> {
        self.body_parents.get(&body).copied()
    }

    pub fn is_attached(&self, body: BodyId) -> bool {
        self.body_parents.contains_key(&body)
    }

    /// Recompute cached world matrices. Cheap to call every frame.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        self.world.clear();
        for idx in 0..self.groups.len() {
            let node = &self.groups[idx];
            let parent_world = match node.parent {
                // Parents are always created first, so their entry exists.
                Some(p) => self.world[p.0 as usize],
                None => Affine3A::IDENTITY,
            };
            self.world.push(parent_world * node.local_matrix());
        }
        self.dirty = false;
    }

    /// World matrix of a group: every ancestor's offset+rotation, outermost first.
    pub fn group_world(&self, id: GroupId) -> Option<Affine3A> {
        if !self.dirty {
            return self.world.get(id.0 as usize).copied();
        }
        let mut node = self.group(id)?;
        let mut m = node.local_matrix();
        while let Some(p) = node.parent {
            node = self.group(p)?;
            m = node.local_matrix() * m;
        }
        Some(m)
    }

    /// World matrix of a body: its parent chain applied to its local transform.
    pub fn world_matrix(&self, body: &Body) -> Affine3A {
        let parent = self
            .parent_of(body.id)
            .flatten()
            .and_then(|g| self.group_world(g))
            .unwrap_or(Affine3A::IDENTITY);
        parent * body.local_matrix()
    }

    /// World-space position of a body's origin.
    pub fn world_position(&self, body: &Body) -> Vec3 {
        Vec3::from(self.world_matrix(body).translation)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of groups in the hierarchy.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

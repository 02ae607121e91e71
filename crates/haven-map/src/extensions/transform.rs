// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by ObjectId.
// Scene nodes only hold world transforms; local offsets and rotations live here.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(child_id, LocalTransform::new().with_offset(offset));
//   graph.set_parent(child_id, Some(parent_id));
//   graph.propagate(&mut scene);  // Updates world positions from local offsets

use std::collections::HashMap;
use glam::{EulerRot, Quat, Vec3};
use crate::api::types::ObjectId;
use crate::core::scene::Scene;

/// Local transform data for nodes in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Euler rotation (XYZ order, radians) relative to parent.
    pub rotation: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    local: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<ObjectId, TransformNode>,
    /// Nodes with no parent (top-level), in registration order.
    roots: Vec<ObjectId>,
    /// Dirty flag, set when hierarchy or locals change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with default local transform.
    pub fn register(&mut self, id: ObjectId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register a node with a specific local transform.
    pub fn register_with(&mut self, id: ObjectId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        // Detach from old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Get the local transform mutably. Marks the graph dirty.
    pub fn get_local_mut(&mut self, id: ObjectId) -> Option<&mut LocalTransform> {
        self.dirty = true;
        self.nodes.get_mut(&id).map(|n| &mut n.local)
    }

    pub fn get_parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: ObjectId) -> Option<&[ObjectId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Walk from `id` up to the root, starting with `id` itself.
    pub fn ancestors(&self, id: ObjectId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: Some(id),
        }
    }

    /// `id` followed by every descendant, depth-first.
    pub fn subtree(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(children) = self.get_children(current) {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Updates node world position and orientation.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, Quat::IDENTITY, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(&self, id: ObjectId, parent_pos: Vec3, parent_rot: Quat, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        let world_pos = parent_pos + parent_rot * local.offset;
        let world_rot = parent_rot * local.quat();

        if let Some(scene_node) = scene.get_mut(id) {
            scene_node.position = world_pos;
            scene_node.orientation = world_rot;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_rot, scene);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    graph: &'a TransformGraph,
    next: Option<ObjectId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        let current = self.next?;
        self.next = self.graph.get_parent(current);
        Some(current)
    }
}

use std::collections::HashMap;

use crate::api::types::{CelestialType, ObjectId};
use crate::components::node::SceneNode;

/// Node storage using a flat Vec plus an id → index map.
/// Sized for map pages: thousands of nodes, not millions.
pub struct Scene {
    nodes: Vec<SceneNode>,
    index: HashMap<ObjectId, usize>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene. A node with the same ID is replaced.
    pub fn spawn(&mut self, node: SceneNode) -> ObjectId {
        let id = node.id;
        if let Some(&idx) = self.index.get(&id) {
            self.nodes[idx] = node;
        } else {
            self.index.insert(id, self.nodes.len());
            self.nodes.push(node);
        }
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        match self.index.get(&id) {
            Some(&idx) => Some(&mut self.nodes[idx]),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Find the first body of the given type with the given name.
    pub fn find_body(&self, kind: CelestialType, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.is_body(kind) && n.name == name)
    }

    /// All bodies of the given type, in spawn order.
    pub fn bodies(&self, kind: CelestialType) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.is_body(kind))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::NodeKind;
    use glam::Vec3;

    fn planet(scene: &mut Scene, name: &str) -> ObjectId {
        let id = scene.next_id();
        scene.spawn(
            SceneNode::new(id, NodeKind::Body(CelestialType::Planet))
                .with_name(name)
                .with_position(Vec3::X),
        )
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = planet(&mut scene, "Alpha");
        assert_eq!(scene.get(id).unwrap().position, Vec3::X);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn respawn_replaces_in_place() {
        let mut scene = Scene::new();
        let a = planet(&mut scene, "A");
        let b = planet(&mut scene, "B");
        scene.spawn(SceneNode::new(a, NodeKind::Body(CelestialType::Planet)).with_name("A2"));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(a).unwrap().name, "A2");
        assert_eq!(scene.get(b).unwrap().name, "B");
    }

    #[test]
    fn find_body_by_type_and_name() {
        let mut scene = Scene::new();
        planet(&mut scene, "A");
        let b = planet(&mut scene, "B");
        assert_eq!(scene.find_body(CelestialType::Planet, "B").unwrap().id, b);
        assert!(scene.find_body(CelestialType::Moon, "B").is_none());
        assert_eq!(scene.bodies(CelestialType::Planet).count(), 2);
    }

    #[test]
    fn ids_are_unique() {
        let mut scene = Scene::new();
        let a = scene.next_id();
        let b = scene.next_id();
        assert_ne!(a, b);
    }
}

use std::rc::Rc;
use glam::{Quat, Vec3};

use crate::api::types::{CelestialType, ObjectId};
use crate::assets::dataset::DomainRecord;
use crate::components::mesh::MeshComponent;

/// What role a node plays in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A celestial object built from a record (or the central star).
    Body(CelestialType),
    /// Invisible oversized collider pointing back at its owner.
    HitProxy { target: ObjectId },
    /// Slightly larger back-faced shell drawn around an octahedron.
    Outline,
    /// Unrotated anchor that moons orbit around.
    OrbitGroup,
    /// Decorative orbit path.
    OrbitRing,
}

/// Fat scene node: one struct with optional parts.
/// Positions and orientations are world-space; local offsets live in the
/// `TransformGraph`.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: ObjectId,
    pub kind: NodeKind,
    /// Type tag used by hover resolution and templates.
    pub tag: Option<CelestialType>,
    /// Display name.
    pub name: String,
    /// Drawn by the renderer. Hidden nodes can still be picked.
    pub visible: bool,
    pub position: Vec3,
    pub orientation: Quat,
    pub mesh: Option<MeshComponent>,
    /// Domain fields, shared between a body and its hit proxy.
    pub payload: Option<Rc<DomainRecord>>,
    /// Emissive intensity recorded when the node was highlighted.
    pub original_intensity: Option<f32>,
}

impl SceneNode {
    pub fn new(id: ObjectId, kind: NodeKind) -> Self {
        let tag = match kind {
            NodeKind::Body(t) => Some(t),
            _ => None,
        };
        Self {
            id,
            kind,
            tag,
            name: String::new(),
            visible: true,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            mesh: None,
            payload: None,
            original_intensity: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: Option<CelestialType>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_payload(mut self, payload: Rc<DomainRecord>) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Back-reference carried by hit proxies.
    pub fn target(&self) -> Option<ObjectId> {
        match self.kind {
            NodeKind::HitProxy { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_body(&self, t: CelestialType) -> bool {
        self.kind == NodeKind::Body(t)
    }

    pub fn emissive_intensity(&self) -> Option<f32> {
        self.mesh.and_then(|m| m.material.emissive_intensity)
    }

    /// Overwrite the emissive intensity. No-op on materials without one.
    pub fn set_emissive_intensity(&mut self, value: f32) -> bool {
        match self.mesh.as_mut().and_then(|m| m.material.emissive_intensity.as_mut()) {
            Some(intensity) => {
                *intensity = value;
                true
            }
            None => false,
        }
    }
}

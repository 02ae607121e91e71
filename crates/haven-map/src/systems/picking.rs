//! Ray picking against the interactive-object registry.
//!
//! Spheres are tested exactly, boxes as oriented boxes and octahedra as the
//! intersection of their eight face half-spaces. Every registered object is
//! tested together with its whole subtree (outline shells, hit proxies).

use glam::{Vec2, Vec3};

use crate::api::types::ObjectId;
use crate::components::mesh::Shape;
use crate::components::node::SceneNode;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::renderer::camera::{CameraState, Ray};

/// Nearest intersection of a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The node whose mesh was hit (may be a shell or a proxy).
    pub node: ObjectId,
    /// Distance along the ray.
    pub distance: f32,
}

/// Why a hit is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Tooltip content: stop at the first node carrying a type tag.
    Hover,
    /// Selection and navigation: follow a hit proxy back to its owner.
    Click,
}

/// Pointer position in pixels → normalized device coordinates.
pub fn ndc(pointer: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        pointer.x / viewport.x * 2.0 - 1.0,
        -(pointer.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Holds the interactive-object registry and casts pick rays against it.
#[derive(Debug, Clone, Default)]
pub struct PickingService {
    registry: Vec<ObjectId>,
}

impl PickingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ObjectId) {
        if !self.registry.contains(&id) {
            self.registry.push(id);
        }
    }

    pub fn registry(&self) -> &[ObjectId] {
        &self.registry
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.registry.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Cast a ray from the camera through a pointer position.
    pub fn pick(
        &self,
        pointer: Vec2,
        viewport: Vec2,
        camera: &CameraState,
        scene: &Scene,
        graph: &TransformGraph,
    ) -> Option<Hit> {
        let ray = camera.ray_from_ndc(ndc(pointer, viewport));
        self.cast(&ray, scene, graph)
    }

    /// Nearest hit among registered objects and their descendants.
    pub fn cast(&self, ray: &Ray, scene: &Scene, graph: &TransformGraph) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for &root in &self.registry {
            for id in graph.subtree(root) {
                let Some(node) = scene.get(id) else { continue };
                let Some(distance) = intersect_node(ray, node) else { continue };
                if nearest.map_or(true, |n| distance < n.distance) {
                    nearest = Some(Hit { node: id, distance });
                }
            }
        }
        nearest
    }

    /// Walk up from the hit node to the object the hit stands for.
    ///
    /// Hover stops at the first tagged node; a hit proxy carries its owner's
    /// tag, so hovering a proxy describes the owner without leaving the proxy.
    /// Click follows the first proxy back-reference, or stops at the first
    /// tagged node when there is none.
    pub fn resolve(hit: ObjectId, purpose: Purpose, scene: &Scene, graph: &TransformGraph) -> Option<ObjectId> {
        for id in graph.ancestors(hit) {
            let Some(node) = scene.get(id) else { continue };
            if purpose == Purpose::Click {
                if let Some(target) = node.target() {
                    return Some(target);
                }
            }
            if node.tag.is_some() {
                return Some(id);
            }
        }
        None
    }
}

/// Distance along `ray` to the node's mesh, if it is hit.
pub fn intersect_node(ray: &Ray, node: &SceneNode) -> Option<f32> {
    let mesh = node.mesh.as_ref()?;
    if let Shape::Sphere { radius } = mesh.shape {
        return intersect_sphere(ray, node.position, radius);
    }

    // Other shapes are tested in the node's local frame.
    let inverse = node.orientation.inverse();
    let local = Ray {
        origin: inverse * (ray.origin - node.position),
        direction: inverse * ray.direction,
    };
    match mesh.shape {
        Shape::Box { size } => intersect_box(&local, Vec3::splat(size * 0.5)),
        Shape::Octahedron { radius } => intersect_octahedron(&local, radius),
        Shape::Sphere { .. } | Shape::Ring { .. } => None,
    }
}

/// Nearest non-negative distance to a sphere.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    let far = -b + sqrt;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Slab test against an origin-centered box with the given half extents.
pub fn intersect_box(ray: &Ray, half: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < f32::EPSILON {
            if origin.abs() > half[axis] {
                return None;
            }
            continue;
        }
        let t1 = (-half[axis] - origin) / dir;
        let t2 = (half[axis] - origin) / dir;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    entry_distance(t_min, t_max)
}

/// Clip the ray against the eight planes `±x ±y ±z = r`.
pub fn intersect_octahedron(ray: &Ray, radius: f32) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for sx in [-1.0f32, 1.0] {
        for sy in [-1.0f32, 1.0] {
            for sz in [-1.0f32, 1.0] {
                let normal = Vec3::new(sx, sy, sz);
                let denom = normal.dot(ray.direction);
                let dist = radius - normal.dot(ray.origin);
                if denom.abs() < f32::EPSILON {
                    if dist < 0.0 {
                        return None;
                    }
                    continue;
                }
                let t = dist / denom;
                if denom < 0.0 {
                    t_min = t_min.max(t);
                } else {
                    t_max = t_max.min(t);
                }
                if t_min > t_max {
                    return None;
                }
            }
        }
    }
    entry_distance(t_min, t_max)
}

fn entry_distance(t_min: f32, t_max: f32) -> Option<f32> {
    if t_max < 0.0 {
        None
    } else if t_min >= 0.0 {
        Some(t_min)
    } else {
        Some(t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CelestialType;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::components::node::NodeKind;
    use crate::extensions::transform::LocalTransform;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_4;

    fn registry(ids: &[ObjectId]) -> PickingService {
        let mut picking = PickingService::new();
        for &id in ids {
            picking.register(id);
        }
        picking
    }

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn sphere_hits_front_surface() {
        let t = intersect_sphere(&ray_down_z(0.0, 0.0), Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(intersect_sphere(&ray_down_z(1.1, 0.0), Vec3::ZERO, 1.0).is_none());
        // Sphere behind the ray.
        assert!(intersect_sphere(&ray_down_z(0.0, 0.0), Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn octahedron_is_exact() {
        // At x = 0.6 the octahedron of radius 1 spans |y| + |z| ≤ 0.4.
        let hit = intersect_octahedron(&ray_down_z(0.6, 0.0), 1.0).unwrap();
        assert!((hit - 9.6).abs() < 1e-4, "hit = {hit}");
        // Inside the bounding sphere, outside the octahedron.
        assert!(intersect_octahedron(&ray_down_z(0.6, 0.5), 1.0).is_none());
    }

    #[test]
    fn box_respects_orientation() {
        let half = Vec3::splat(0.5);
        assert!(intersect_box(&ray_down_z(0.6, 0.0), half).is_none());

        let node = SceneNode::new(ObjectId(1), NodeKind::Body(CelestialType::Station))
            .with_mesh(MeshComponent::new(Shape::Box { size: 1.0 }, Material::default()));
        let mut rotated = node.clone();
        rotated.orientation = Quat::from_rotation_z(FRAC_PI_4);
        // A corner now reaches out to ~0.707 on the x axis.
        assert!(intersect_node(&ray_down_z(0.6, 0.0), &node).is_none());
        assert!(intersect_node(&ray_down_z(0.6, 0.0), &rotated).is_some());
    }

    #[test]
    fn rings_are_never_hit() {
        let node = SceneNode::new(ObjectId(1), NodeKind::OrbitRing)
            .with_mesh(MeshComponent::new(Shape::Ring { radius: 2.0 }, Material::default()));
        assert!(intersect_node(&ray_down_z(2.0, 0.0), &node).is_none());
    }

    #[test]
    fn ndc_maps_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(ndc(Vec2::new(800.0, 600.0), viewport), Vec2::new(1.0, -1.0));
    }

    /// Planet with an outline shell and an oversized proxy, like the builder makes.
    fn planet_with_proxy() -> (Scene, TransformGraph, ObjectId, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        let planet = scene.next_id();
        scene.spawn(
            SceneNode::new(planet, NodeKind::Body(CelestialType::Planet))
                .with_name("Terra")
                .with_mesh(MeshComponent::new(Shape::Octahedron { radius: 1.0 }, Material::default())),
        );
        graph.register(planet);

        let outline = scene.next_id();
        scene.spawn(
            SceneNode::new(outline, NodeKind::Outline)
                .with_mesh(MeshComponent::new(Shape::Octahedron { radius: 1.05 }, Material::default().back_side())),
        );
        graph.register_with(outline, LocalTransform::new());
        graph.set_parent(outline, Some(planet));

        let proxy = scene.next_id();
        scene.spawn(
            SceneNode::new(proxy, NodeKind::HitProxy { target: planet })
                .with_tag(Some(CelestialType::Planet))
                .with_mesh(MeshComponent::new(Shape::Sphere { radius: 2.0 }, Material::default()))
                .hidden(),
        );
        graph.register(proxy);
        graph.set_parent(proxy, Some(planet));
        graph.propagate(&mut scene);
        (scene, graph, planet, outline, proxy)
    }

    #[test]
    fn proxy_extends_pick_area() {
        let (scene, graph, planet, _, proxy) = planet_with_proxy();
        let picking = registry(&[planet, proxy]);
        let hit = picking.cast(&ray_down_z(1.5, 0.0), &scene, &graph).unwrap();
        assert_eq!(hit.node, proxy);
        assert!(picking.cast(&ray_down_z(2.5, 0.0), &scene, &graph).is_none());
    }

    #[test]
    fn click_follows_proxy_hover_stays() {
        let (scene, graph, planet, outline, proxy) = planet_with_proxy();
        assert_eq!(PickingService::resolve(proxy, Purpose::Click, &scene, &graph), Some(planet));
        assert_eq!(PickingService::resolve(proxy, Purpose::Hover, &scene, &graph), Some(proxy));
        // Shells have no tag: both purposes land on the owner.
        assert_eq!(PickingService::resolve(outline, Purpose::Hover, &scene, &graph), Some(planet));
        assert_eq!(PickingService::resolve(outline, Purpose::Click, &scene, &graph), Some(planet));
    }

    #[test]
    fn nearest_hit_wins() {
        let (scene, graph, planet, _, proxy) = planet_with_proxy();
        let picking = registry(&[planet, proxy]);
        // Straight through the middle: the proxy sphere (r = 2) is entered first.
        let hit = picking.cast(&ray_down_z(0.0, 0.0), &scene, &graph).unwrap();
        assert_eq!(hit.node, proxy);
        assert!((hit.distance - 8.0).abs() < 1e-4);
    }

    #[test]
    fn registry_has_no_duplicates() {
        let mut picking = PickingService::new();
        picking.register(ObjectId(1));
        picking.register(ObjectId(1));
        assert_eq!(picking.len(), 1);
        assert!(picking.contains(ObjectId(1)));
    }
}

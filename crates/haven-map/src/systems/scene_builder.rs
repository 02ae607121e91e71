//! Data-driven scene construction.
//!
//! Turns dataset records plus the visual config into scene nodes, the
//! interactive-object registry, system labels and moon orbits. Bad input
//! never aborts a build: the offending record or moon is skipped, logged
//! once, and listed in the `BuildReport`.

use std::collections::HashMap;
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use serde_json::{json, Value};

use crate::api::config::MapConfig;
use crate::api::types::{CelestialType, ObjectId, ViewMode};
use crate::assets::dataset::{Dataset, DomainRecord};
use crate::assets::visual_config::{rgb, GeometryKind, TypeVisual, VisualConfig};
use crate::components::label::LabelEntry;
use crate::components::mesh::{Material, MeshComponent, Shape};
use crate::components::node::{NodeKind, SceneNode};
use crate::core::error::SceneError;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::systems::orbits::{
    MoonOrbit, OrbitalMotionSimulator, DEFAULT_ORBIT_DISTANCE, DEFAULT_ORBIT_SPEED,
};
use crate::systems::picking::PickingService;

pub const SUN_NAME: &str = "Central Star";

const OUTLINE_SCALE: f32 = 1.05;
const OUTLINE_COLOR: u32 = 0x00ffff;
const OUTLINE_OPACITY: f32 = 0.3;

const MOON_COLOR: u32 = 0xb4b4c8;
const MOON_EMISSIVE: u32 = 0x333333;
const MOON_RING_COLOR: u32 = 0x888888;
const MOON_RING_OPACITY: f32 = 0.3;

const PLANET_RING_COLOR: u32 = 0x00ced1;
const PLANET_RING_OPACITY: f32 = 0.15;
/// Planet orbits closer to the star than this get no ring.
const PLANET_RING_MIN_RADIUS: f32 = 0.5;

/// Smallest framing radius for the system-view camera preset.
const PRESET_MIN_RADIUS: f32 = 40.0;

/// What a build recovered from, plus a few counts for logging.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub errors: Vec<SceneError>,
    pub bodies: usize,
    pub moons: usize,
    pub labels: usize,
}

impl BuildReport {
    fn warn(&mut self, error: SceneError) {
        log::warn!("{error}");
        self.errors.push(error);
    }
}

/// Everything a build produces.
#[derive(Default)]
pub struct MapScene {
    pub scene: Scene,
    pub graph: TransformGraph,
    /// Interactive-object registry: bodies, hit proxies and moons.
    pub picking: PickingService,
    /// System bodies, in dataset order.
    pub systems: Vec<ObjectId>,
    /// One label per system (galaxy view only).
    pub labels: Vec<LabelEntry>,
    pub orbits: OrbitalMotionSimulator,
    pub sun: Option<ObjectId>,
    /// Region centroid markers (galaxy view, when enabled).
    pub regions: Vec<ObjectId>,
    /// Orbit rings of planets around the star (system view).
    pub planet_rings: Vec<ObjectId>,
    /// Initial camera (position, target), when the view has a preset.
    pub camera_preset: Option<(Vec3, Vec3)>,
    pub report: BuildReport,
}

/// Builds a `MapScene` for one view of a dataset.
pub struct SceneBuilder<'a> {
    visuals: &'a VisualConfig,
    config: &'a MapConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(visuals: &'a VisualConfig, config: &'a MapConfig) -> Self {
        Self { visuals, config }
    }

    pub fn build(&self, dataset: &Dataset) -> MapScene {
        let mut out = MapScene::default();
        let view_mode = self.config.view_mode;

        if view_mode == ViewMode::System {
            self.build_sun(&mut out);
        }

        for record in dataset.iter() {
            self.build_record(record, &mut out);
        }

        match view_mode {
            ViewMode::Galaxy => {
                if self.config.show_regions {
                    self.build_regions(&mut out);
                }
            }
            ViewMode::System => {
                self.build_moons(dataset, &mut out);
                self.build_planet_rings(&mut out);
                out.camera_preset = Some(self.system_camera_preset(&out));
            }
        }

        out.graph.propagate(&mut out.scene);
        log::info!(
            "built {:?} view: {} bodies, {} moons, {} labels, {} interactive, {} warnings",
            view_mode,
            out.report.bodies,
            out.report.moons,
            out.report.labels,
            out.picking.len(),
            out.report.errors.len(),
        );
        out
    }

    fn build_sun(&self, out: &mut MapScene) {
        let Some(visual) = self.visuals.get(CelestialType::Sun.as_str()) else { return };
        let payload = DomainRecord::from_value(json!({ "name": SUN_NAME, "type": "Star" }))
            .unwrap_or_default();
        let id = out.scene.next_id();
        out.scene.spawn(
            SceneNode::new(id, NodeKind::Body(CelestialType::Sun))
                .with_name(SUN_NAME)
                .with_mesh(MeshComponent::new(
                    Shape::from_geometry(visual.geometry, visual.size),
                    Material::new(rgb(visual.color)).with_opacity(1.0),
                ))
                .with_payload(Rc::new(payload)),
        );
        out.graph.register(id);
        out.picking.register(id);
        out.sun = Some(id);
        out.report.bodies += 1;
    }

    fn build_record(&self, record: &DomainRecord, out: &mut MapScene) {
        let type_name = record.type_name();
        let name = record.name().unwrap_or(type_name);
        let Some(visual) = self.visuals.get(type_name) else {
            out.report.warn(SceneError::UnknownType {
                type_name: type_name.to_string(),
                name: name.to_string(),
            });
            return;
        };
        let Some(kind) = record.celestial_type() else {
            out.report.warn(SceneError::UnsupportedType {
                type_name: type_name.to_string(),
                name: name.to_string(),
            });
            return;
        };

        if !self.included(kind) {
            return;
        }

        let position = record.position();
        let payload = Rc::new(record.clone());
        let id = self.spawn_body(out, kind, name, position, visual, Rc::clone(&payload));
        out.picking.register(id);

        if visual.geometry == GeometryKind::Octahedron
            && matches!(kind, CelestialType::Region | CelestialType::System | CelestialType::Planet)
        {
            self.attach_outline(out, id, visual.size);
        }

        if let Some(radius) = visual.effective_hit_radius() {
            let proxy = out.scene.next_id();
            out.scene.spawn(
                SceneNode::new(proxy, NodeKind::HitProxy { target: id })
                    .with_tag(Some(kind))
                    .with_name(name)
                    .with_mesh(MeshComponent::new(Shape::Sphere { radius }, Material::default()))
                    .with_payload(payload)
                    .hidden(),
            );
            out.graph.register(proxy);
            out.graph.set_parent(proxy, Some(id));
            out.picking.register(proxy);
        }

        if kind == CelestialType::System {
            out.systems.push(id);
            if self.config.view_mode == ViewMode::Galaxy {
                out.labels.push(LabelEntry::new(name, id, position, self.config.label_lift));
                out.report.labels += 1;
            }
        }
    }

    /// View filter: the galaxy shows only systems; a system view shows its
    /// contents, never region or system markers.
    fn included(&self, kind: CelestialType) -> bool {
        match self.config.view_mode {
            ViewMode::Galaxy => kind == CelestialType::System,
            ViewMode::System => !matches!(kind, CelestialType::Region | CelestialType::System),
        }
    }

    fn spawn_body(
        &self,
        out: &mut MapScene,
        kind: CelestialType,
        name: &str,
        position: Vec3,
        visual: &TypeVisual,
        payload: Rc<DomainRecord>,
    ) -> ObjectId {
        let id = out.scene.next_id();
        out.scene.spawn(
            SceneNode::new(id, NodeKind::Body(kind))
                .with_name(name)
                .with_position(position)
                .with_mesh(MeshComponent::from_visual(visual))
                .with_payload(payload),
        );
        let rotation = visual.rotation.map(Vec3::from_array).unwrap_or(Vec3::ZERO);
        out.graph.register_with(
            id,
            LocalTransform::new().with_offset(position).with_rotation(rotation),
        );
        out.report.bodies += 1;
        id
    }

    fn attach_outline(&self, out: &mut MapScene, owner: ObjectId, size: f32) {
        let id = out.scene.next_id();
        out.scene.spawn(
            SceneNode::new(id, NodeKind::Outline).with_mesh(MeshComponent::new(
                Shape::Octahedron { radius: size * OUTLINE_SCALE },
                Material::new(rgb(OUTLINE_COLOR))
                    .with_opacity(OUTLINE_OPACITY)
                    .back_side(),
            )),
        );
        out.graph.register(id);
        out.graph.set_parent(id, Some(owner));
    }

    fn build_moons(&self, dataset: &Dataset, out: &mut MapScene) {
        let mut rng = Rng::new(self.config.rng_seed);
        let mut groups: HashMap<ObjectId, ObjectId> = HashMap::new();

        for record in dataset.iter() {
            if record.str_field("type") != Some(CelestialType::Planet.as_str()) {
                continue;
            }
            let moons = record.moons();
            if moons.is_empty() {
                continue;
            }
            let planet_name = record.name().unwrap_or_default();
            let Some(planet) = out.scene.find_body(CelestialType::Planet, planet_name) else {
                out.report.warn(SceneError::PlanetNotFound {
                    planet: planet_name.to_string(),
                    moons: moons.len(),
                });
                continue;
            };
            let (planet_id, planet_pos) = (planet.id, planet.position);

            let group = *groups.entry(planet_id).or_insert_with(|| {
                let group = out.scene.next_id();
                out.scene.spawn(
                    SceneNode::new(group, NodeKind::OrbitGroup)
                        .with_name(planet_name)
                        .with_position(planet_pos),
                );
                out.graph
                    .register_with(group, LocalTransform::new().with_offset(planet_pos));
                group
            });

            for (index, entry) in moons.iter().enumerate() {
                match MoonEntry::parse(entry) {
                    Ok(parsed) => {
                        let phase = rng.next_f32() * TAU;
                        self.spawn_moon(out, planet_id, group, parsed, phase);
                    }
                    Err(reason) => out.report.warn(SceneError::MalformedMoon {
                        planet: planet_name.to_string(),
                        index,
                        reason,
                    }),
                }
            }
        }
    }

    fn spawn_moon(&self, out: &mut MapScene, planet: ObjectId, group: ObjectId, parsed: MoonEntry, phase: f32) {
        let visual = self.visuals.get(CelestialType::Moon.as_str());
        let mut material = match visual {
            Some(visual) => Material::from_visual(visual),
            None => Material::new(rgb(MOON_COLOR)).with_emissive(rgb(MOON_EMISSIVE), 1.0),
        };
        if let Some(color) = parsed.color {
            material.color = rgb(color);
        }

        let moon = out.scene.next_id();
        out.scene.spawn(
            SceneNode::new(moon, NodeKind::Body(CelestialType::Moon))
                .with_name(parsed.name.as_str())
                .with_mesh(MeshComponent::new(
                    Shape::Sphere { radius: self.config.moon_radius },
                    material,
                ))
                .with_payload(Rc::new(parsed.record)),
        );

        let ring = out.scene.next_id();
        out.scene.spawn(
            SceneNode::new(ring, NodeKind::OrbitRing).with_mesh(MeshComponent::new(
                Shape::Ring { radius: parsed.radius },
                Material::new(rgb(MOON_RING_COLOR)).with_opacity(MOON_RING_OPACITY),
            )),
        );
        out.graph.register(ring);
        out.graph.set_parent(ring, Some(group));

        let orbit = MoonOrbit {
            planet,
            group,
            moon,
            ring: Some(ring),
            radius: parsed.radius,
            angular_speed: parsed.speed,
            phase,
        };
        out.graph
            .register_with(moon, LocalTransform::new().with_offset(orbit.local_position()));
        out.graph.set_parent(moon, Some(group));
        out.picking.register(moon);
        out.orbits.add(orbit);
        out.report.moons += 1;
    }

    fn build_regions(&self, out: &mut MapScene) {
        let Some(visual) = self.visuals.get(CelestialType::Region.as_str()) else { return };

        // Region name → member positions, in order of first appearance.
        let mut members: Vec<(String, Vec<Vec3>)> = Vec::new();
        for &id in &out.systems {
            let Some(node) = out.scene.get(id) else { continue };
            let Some(region) = node.payload.as_ref().and_then(|p| p.region()) else { continue };
            match members.iter_mut().find(|(name, _)| name == region) {
                Some((_, positions)) => positions.push(node.position),
                None => members.push((region.to_string(), vec![node.position])),
            }
        }

        for (name, positions) in members {
            let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
            let payload = DomainRecord::from_value(json!({ "name": name, "count": positions.len() }))
                .unwrap_or_default();
            let id = self.spawn_body(out, CelestialType::Region, &name, centroid, visual, Rc::new(payload));
            out.picking.register(id);
            out.regions.push(id);
        }
    }

    fn build_planet_rings(&self, out: &mut MapScene) {
        let mut radii: Vec<f32> = Vec::new();
        for planet in out.scene.bodies(CelestialType::Planet) {
            let r = Vec2::new(planet.position.x, planet.position.z).length();
            let key = (r * 100.0).round() / 100.0;
            if key > PLANET_RING_MIN_RADIUS && !radii.contains(&key) {
                radii.push(key);
            }
        }

        for radius in radii {
            let id = out.scene.next_id();
            out.scene.spawn(
                SceneNode::new(id, NodeKind::OrbitRing).with_mesh(MeshComponent::new(
                    Shape::Ring { radius },
                    Material::new(rgb(PLANET_RING_COLOR)).with_opacity(PLANET_RING_OPACITY),
                )),
            );
            out.graph.register(id);
            out.planet_rings.push(id);
        }
    }

    /// Frame every planet: `d = max(40, maxR * 2.4)` with `maxR` at least 40.
    fn system_camera_preset(&self, out: &MapScene) -> (Vec3, Vec3) {
        let max_radius = out
            .scene
            .bodies(CelestialType::Planet)
            .map(|p| Vec2::new(p.position.x, p.position.z).length())
            .fold(PRESET_MIN_RADIUS, f32::max);
        let distance = PRESET_MIN_RADIUS.max(max_radius * 2.4);
        (
            Vec3::new(distance * 0.7, distance * 0.5, distance * 0.7),
            Vec3::ZERO,
        )
    }
}

/// A validated moon entry.
#[derive(Debug, Clone, PartialEq)]
struct MoonEntry {
    name: String,
    radius: f32,
    speed: f32,
    color: Option<u32>,
    record: DomainRecord,
}

impl MoonEntry {
    /// Moons are either a bare name or an object with optional
    /// `orbit_distance`, `orbit_speed` and `color`.
    fn parse(entry: &Value) -> Result<Self, String> {
        match entry {
            Value::String(name) => Ok(Self {
                name: name.clone(),
                radius: DEFAULT_ORBIT_DISTANCE,
                speed: DEFAULT_ORBIT_SPEED,
                color: None,
                record: DomainRecord::from_value(json!({ "name": name })).unwrap_or_default(),
            }),
            Value::Object(fields) => {
                let radius = optional_number(fields.get("orbit_distance"), "orbit_distance")?
                    .unwrap_or(DEFAULT_ORBIT_DISTANCE);
                if radius <= 0.0 {
                    return Err(format!("orbit_distance must be positive, got {radius}"));
                }
                let speed = optional_number(fields.get("orbit_speed"), "orbit_speed")?
                    .unwrap_or(DEFAULT_ORBIT_SPEED);
                Ok(Self {
                    name: fields
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    radius,
                    speed,
                    color: fields.get("color").and_then(parse_color),
                    record: DomainRecord::new(fields.clone()),
                })
            }
            other => Err(format!("expected a name or an object, got {other}")),
        }
    }
}

/// Absent, null and zero mean "use the default"; anything else must be a
/// finite number.
fn optional_number(value: Option<&Value>, field: &str) -> Result<Option<f32>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let v = n.as_f64().unwrap_or(f64::NAN) as f32;
            if !v.is_finite() {
                Err(format!("{field} is not finite"))
            } else if v == 0.0 {
                Ok(None)
            } else {
                Ok(Some(v))
            }
        }
        Some(other) => Err(format!("{field} must be a number, got {other}")),
    }
}

/// `0xRRGGBB` as a number, or a `"#rrggbb"` / `"0xrrggbb"` string.
fn parse_color(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => {
            let hex = s.strip_prefix('#').or_else(|| s.strip_prefix("0x"))?;
            u32::from_str_radix(hex, 16).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(values: Value) -> Dataset {
        let Value::Array(values) = values else { panic!("expected array") };
        Dataset::from_values(values).0
    }

    fn build(config: &MapConfig, data: Value) -> MapScene {
        let visuals = VisualConfig::haven_default();
        SceneBuilder::new(&visuals, config).build(&dataset(data))
    }

    #[test]
    fn unknown_type_warns_once_and_adds_nothing() {
        let config = MapConfig::galaxy();
        let base = json!([{ "type": "system", "name": "Sol", "x": 5.0 }]);
        let with_unknown = json!([
            { "type": "system", "name": "Sol", "x": 5.0 },
            { "type": "nebula", "name": "Crab" }
        ]);

        let clean = build(&config, base);
        let dirty = build(&config, with_unknown);
        assert!(clean.report.errors.is_empty());
        assert_eq!(dirty.picking.len(), clean.picking.len());
        assert_eq!(dirty.report.errors.len(), 1);
        assert!(matches!(
            &dirty.report.errors[0],
            SceneError::UnknownType { type_name, name } if type_name == "nebula" && name == "Crab"
        ));
    }

    #[test]
    fn missing_type_defaults_to_system() {
        let built = build(&MapConfig::galaxy(), json!([{ "name": "Sol", "x": 3.0 }]));
        assert_eq!(built.systems.len(), 1);
        assert_eq!(built.labels.len(), 1);
        assert_eq!(built.labels[0].text, "Sol");
    }

    #[test]
    fn nameless_system_label_matches_node_name() {
        let built = build(&MapConfig::galaxy(), json!([{ "x": 3.0 }]));
        assert_eq!(built.labels.len(), 1);
        assert_eq!(built.labels[0].text, "system");
        let node = built.scene.find_body(CelestialType::System, "system").unwrap();
        assert_eq!(built.labels[0].target, node.id);
    }

    #[test]
    fn styled_type_without_placement_is_unsupported() {
        let mut visuals = VisualConfig::haven_default();
        visuals.insert("nebula", TypeVisual::new(GeometryKind::Sphere, 1.0, 0xff00ff));
        let built = SceneBuilder::new(&visuals, &MapConfig::galaxy())
            .build(&dataset(json!([{ "type": "nebula", "name": "Crab" }])));
        assert_eq!(built.picking.len(), 0);
        assert_eq!(built.report.errors.len(), 1);
        assert!(matches!(
            &built.report.errors[0],
            SceneError::UnsupportedType { type_name, name } if type_name == "nebula" && name == "Crab"
        ));
    }

    #[test]
    fn near_origin_system_only_in_galaxy_view() {
        let data = json!([{ "type": "system", "name": "Hub", "x": 0.3 }]);
        let galaxy = build(&MapConfig::galaxy(), data.clone());
        assert!(galaxy.scene.find_body(CelestialType::System, "Hub").is_some());

        let system = build(&MapConfig::system("Hub"), data);
        assert!(system.scene.find_body(CelestialType::System, "Hub").is_none());
    }

    #[test]
    fn view_filters() {
        let data = json!([
            { "type": "region", "name": "Core" },
            { "type": "system", "name": "Sol", "x": 10.0 },
            { "type": "planet", "name": "Terra", "x": 10.0 },
            { "type": "station", "name": "Dock", "x": 4.0 }
        ]);
        let galaxy = build(&MapConfig::galaxy(), data.clone());
        assert_eq!(galaxy.report.bodies, 1);
        assert!(galaxy.sun.is_none());

        let system = build(&MapConfig::system("Sol"), data);
        assert!(system.sun.is_some());
        assert!(system.scene.find_body(CelestialType::Planet, "Terra").is_some());
        assert!(system.scene.find_body(CelestialType::Station, "Dock").is_some());
        assert!(system.scene.find_body(CelestialType::Region, "Core").is_none());
        assert!(system.scene.find_body(CelestialType::System, "Sol").is_none());
        assert!(system.labels.is_empty());
    }

    #[test]
    fn hit_proxy_shares_owner_identity() {
        let built = build(&MapConfig::galaxy(), json!([{ "name": "Sol", "region": "Core", "x": 5.0 }]));
        let system = built.systems[0];
        let proxy = built
            .scene
            .iter()
            .find(|n| n.target() == Some(system))
            .expect("system has a proxy");
        assert!(!proxy.visible);
        assert_eq!(proxy.tag, Some(CelestialType::System));
        assert_eq!(proxy.name, "Sol");
        assert_eq!(proxy.mesh.unwrap().shape, Shape::Sphere { radius: 1.2 });
        assert!(built.picking.contains(system));
        assert!(built.picking.contains(proxy.id));
        assert_eq!(built.graph.get_parent(proxy.id), Some(system));
        assert_eq!(proxy.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn octahedra_get_outline_shells() {
        let mut visuals = VisualConfig::haven_default();
        visuals.insert("planet", TypeVisual::new(GeometryKind::Octahedron, 1.0, 0x008b8d));
        let config = MapConfig::system("Sol");
        let built = SceneBuilder::new(&visuals, &config)
            .build(&dataset(json!([{ "type": "planet", "name": "Terra" }])));
        let planet = built.scene.find_body(CelestialType::Planet, "Terra").unwrap().id;
        let children = built.graph.get_children(planet).unwrap();
        assert_eq!(children.len(), 1);
        let outline = built.scene.get(children[0]).unwrap();
        assert_eq!(outline.kind, NodeKind::Outline);
        let mesh = outline.mesh.unwrap();
        assert!((mesh.shape.extent() - 1.05).abs() < 1e-6);
        assert!(mesh.material.back_side);
        assert_eq!(mesh.material.opacity, 0.3);
    }

    #[test]
    fn station_gets_static_rotation() {
        let built = build(&MapConfig::system("Sol"), json!([{ "type": "station", "name": "Dock" }]));
        let station = built.scene.find_body(CelestialType::Station, "Dock").unwrap();
        assert_ne!(station.orientation, glam::Quat::IDENTITY);
    }

    #[test]
    fn two_moons_on_one_planet() {
        let built = build(
            &MapConfig::system("Sol"),
            json!([{ "type": "planet", "name": "Terra", "moons": ["Luna", { "name": "Selene", "orbit_distance": 3.0, "orbit_speed": 0.5 }] }]),
        );
        let moons: Vec<&SceneNode> = built.scene.bodies(CelestialType::Moon).collect();
        assert_eq!(moons.len(), 2);
        assert!(moons.iter().all(|m| built.picking.contains(m.id)));
        assert_eq!(built.orbits.len(), 2);
        let selene = built.orbits.orbits().iter().find(|o| o.radius == 3.0).unwrap();
        assert_eq!(selene.angular_speed, 0.5);
        assert!(selene.ring.is_some());
        let luna = built.scene.find_body(CelestialType::Moon, "Luna").unwrap();
        assert!((luna.position.length() - DEFAULT_ORBIT_DISTANCE).abs() < 1e-4);
        assert_eq!(luna.mesh.unwrap().shape, Shape::Sphere { radius: 0.15 });
    }

    #[test]
    fn moon_phases_are_reproducible() {
        let data = json!([{ "type": "planet", "name": "Terra", "moons": ["A", "B"] }]);
        let a = build(&MapConfig::system("Sol"), data.clone());
        let b = build(&MapConfig::system("Sol"), data);
        let phases = |m: &MapScene| m.orbits.orbits().iter().map(|o| o.phase).collect::<Vec<_>>();
        assert_eq!(phases(&a), phases(&b));
        assert!(phases(&a).iter().all(|p| (0.0..=TAU).contains(p)));
    }

    #[test]
    fn bad_moon_is_isolated() {
        let built = build(
            &MapConfig::system("Sol"),
            json!([{ "type": "planet", "name": "Terra", "moons": ["Luna", 42, { "name": "Bad", "orbit_distance": -1 }, { "name": "Phobos" }] }]),
        );
        assert_eq!(built.orbits.len(), 2);
        assert_eq!(built.report.errors.len(), 2);
        assert!(built
            .report
            .errors
            .iter()
            .all(|e| matches!(e, SceneError::MalformedMoon { planet, .. } if planet == "Terra")));
    }

    #[test]
    fn moons_of_missing_planet_warn_once() {
        let mut visuals = VisualConfig::haven_default();
        visuals.remove("planet");
        visuals.insert("world", TypeVisual::new(GeometryKind::Sphere, 1.0, 0xffffff));
        let config = MapConfig::system("Sol");
        let built = SceneBuilder::new(&visuals, &config)
            .build(&dataset(json!([{ "type": "planet", "name": "Terra", "moons": ["Luna", "Io"] }])));
        let missing: Vec<&SceneError> = built
            .report
            .errors
            .iter()
            .filter(|e| matches!(e, SceneError::PlanetNotFound { .. }))
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(built.orbits.is_empty());
    }

    #[test]
    fn region_markers_are_opt_in() {
        let data = json!([
            { "name": "A", "region": "Core", "x": 0.0 },
            { "name": "B", "region": "Core", "x": 10.0 },
            { "name": "C", "region": "Rim", "x": 50.0 }
        ]);
        assert!(build(&MapConfig::galaxy(), data.clone()).regions.is_empty());

        let config = MapConfig {
            show_regions: true,
            ..MapConfig::galaxy()
        };
        let built = build(&config, data);
        assert_eq!(built.regions.len(), 2);
        let core = built.scene.find_body(CelestialType::Region, "Core").unwrap();
        assert_eq!(core.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(core.payload.as_ref().unwrap().number("count"), Some(2.0));
        assert!(built.picking.contains(core.id));
    }

    #[test]
    fn system_camera_preset_frames_planets() {
        let near = build(&MapConfig::system("Sol"), json!([{ "type": "planet", "name": "P", "x": 10.0 }]));
        let (pos, target) = near.camera_preset.unwrap();
        assert_eq!(target, Vec3::ZERO);
        // maxR stays at 40: d = 96.
        assert!((pos - Vec3::new(67.2, 48.0, 67.2)).length() < 1e-3);

        let far = build(&MapConfig::system("Sol"), json!([{ "type": "planet", "name": "P", "x": 60.0, "z": 80.0 }]));
        let (pos, _) = far.camera_preset.unwrap();
        assert!((pos.y - 240.0 * 0.5).abs() < 1e-3);
        assert_eq!(far.planet_rings.len(), 1);
    }

    #[test]
    fn moon_colors() {
        assert_eq!(parse_color(&json!(0xff9900)), Some(0xff9900));
        assert_eq!(parse_color(&json!("#00ff00")), Some(0x00ff00));
        assert_eq!(parse_color(&json!("0x0000ff")), Some(0x0000ff));
        assert_eq!(parse_color(&json!("green")), None);
    }
}

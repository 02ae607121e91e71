//! Cosmetic circular moon orbits (system view).

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::types::ObjectId;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;

/// Orbit radius when a moon entry doesn't give one.
pub const DEFAULT_ORBIT_DISTANCE: f32 = 2.0;
/// Angular speed (rad/s) when a moon entry doesn't give one.
pub const DEFAULT_ORBIT_SPEED: f32 = 1.0;

/// Per-frame tumble applied to every moon mesh (Euler x, y).
const MOON_SPIN: Vec3 = Vec3::new(0.001, 0.002, 0.0);

/// One moon on a circle around its planet's orbit group.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonOrbit {
    pub planet: ObjectId,
    /// Orbit group anchored at the planet; moon and ring are its children.
    pub group: ObjectId,
    pub moon: ObjectId,
    pub ring: Option<ObjectId>,
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    /// Current angle in `[0, 2π)`.
    pub phase: f32,
}

impl MoonOrbit {
    /// Advance the phase by `speed * dt`, wrapped into `[0, 2π)`.
    pub fn advance(&mut self, dt: f32) {
        self.phase = (self.phase + self.angular_speed * dt).rem_euclid(TAU);
    }

    /// Position relative to the orbit group, in its xz-plane.
    pub fn local_position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.phase.cos(),
            0.0,
            self.radius * self.phase.sin(),
        )
    }
}

/// Advances every moon each frame and keeps orbit rings in step with the
/// decorations toggle.
#[derive(Debug, Default)]
pub struct OrbitalMotionSimulator {
    orbits: Vec<MoonOrbit>,
}

impl OrbitalMotionSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, orbit: MoonOrbit) {
        self.orbits.push(orbit);
    }

    pub fn orbits(&self) -> &[MoonOrbit] {
        &self.orbits
    }

    pub fn get(&self, moon: ObjectId) -> Option<&MoonOrbit> {
        self.orbits.iter().find(|o| o.moon == moon)
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    /// Move every moon to its new phase. World positions follow on the next
    /// `TransformGraph::propagate`.
    pub fn update(&mut self, dt: f32, graph: &mut TransformGraph) {
        for orbit in &mut self.orbits {
            orbit.advance(dt);
            let offset = orbit.local_position();
            if let Some(local) = graph.get_local_mut(orbit.moon) {
                local.offset = offset;
                local.rotation += MOON_SPIN;
            }
        }
    }

    /// Ring visibility mirrors the shared decorations flag.
    pub fn sync_rings(&self, decorations_visible: bool, scene: &mut Scene) {
        for ring in self.orbits.iter().filter_map(|o| o.ring) {
            if let Some(node) = scene.get_mut(ring) {
                node.visible = decorations_visible;
            }
        }
    }
}

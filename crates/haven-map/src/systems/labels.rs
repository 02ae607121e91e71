//! System label declutter (galaxy view).
//!
//! Each frame only the nearest labels within range are shown, capped at a
//! fixed count, and every label is moved back above its system.

use glam::Vec3;

use crate::components::label::LabelEntry;
use crate::core::scene::Scene;

/// Chooses which system labels are visible each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelDeclutterer {
    /// Most labels visible at once.
    pub limit: usize,
    /// Labels farther than this from the camera stay hidden.
    pub max_distance: f32,
    /// Height of a label above its system.
    pub lift: f32,
}

impl Default for LabelDeclutterer {
    fn default() -> Self {
        Self {
            limit: 30,
            max_distance: 250.0,
            lift: 2.5,
        }
    }
}

impl LabelDeclutterer {
    pub fn new(limit: usize, max_distance: f32, lift: f32) -> Self {
        Self {
            limit,
            max_distance,
            lift,
        }
    }

    /// Reposition every label and recompute visibility.
    /// With `enabled == false` every label is hidden. Returns the number shown.
    pub fn update(&self, labels: &mut [LabelEntry], scene: &Scene, camera: Vec3, enabled: bool) -> usize {
        let mut candidates: Vec<(usize, f32)> = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter_mut().enumerate() {
            label.visible = false;
            let Some(target) = scene.get(label.target) else { continue };
            label.position = target.position + Vec3::Y * self.lift;
            let distance = camera.distance(target.position);
            if distance <= self.max_distance {
                candidates.push((i, distance));
            }
        }

        if !enabled {
            return 0;
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        candidates.truncate(self.limit);
        for &(i, _) in &candidates {
            labels[i].visible = true;
        }
        candidates.len()
    }
}

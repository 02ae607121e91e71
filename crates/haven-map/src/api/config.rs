use serde::{Deserialize, Serialize};

use crate::api::types::ViewMode;

/// Configuration for a map page, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Viewport height in CSS pixels.
    pub viewport_height: f32,
    pub view_mode: ViewMode,
    /// Display name of the system shown in system view.
    pub system_name: String,
    /// Path of the hosting page, used to resolve relative photo links.
    pub page_path: String,
    /// Build region centroid markers in galaxy view (default: off).
    pub show_regions: bool,
    /// Maximum number of system labels visible at once (default: 30).
    pub label_limit: usize,
    /// Labels farther than this from the camera are hidden (default: 250).
    pub label_max_distance: f32,
    /// Height of a label above its system (default: 2.5).
    pub label_lift: f32,
    /// Radius of moon meshes (default: 0.15).
    pub moon_radius: f32,
    /// Pointer travel in pixels that turns a click into a drag (default: 5).
    pub drag_threshold: f32,
    /// Longest frame delta fed to the simulation, in seconds (default: 0.25).
    pub max_frame_dt: f32,
    /// Seed for moon starting phases.
    pub rng_seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            view_mode: ViewMode::Galaxy,
            system_name: String::new(),
            page_path: String::new(),
            show_regions: false,
            label_limit: 30,
            label_max_distance: 250.0,
            label_lift: 2.5,
            moon_radius: 0.15,
            drag_threshold: 5.0,
            max_frame_dt: 0.25,
            rng_seed: 42,
        }
    }
}

impl MapConfig {
    pub fn galaxy() -> Self {
        Self::default()
    }

    pub fn system(name: impl Into<String>) -> Self {
        Self {
            view_mode: ViewMode::System,
            system_name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MapConfig::from_json(r#"{"view_mode":"system","system_name":"Sol"}"#).unwrap();
        assert_eq!(config.view_mode, ViewMode::System);
        assert_eq!(config.system_name, "Sol");
        assert_eq!(config.label_limit, 30);
        assert_eq!(config.label_max_distance, 250.0);
    }
}

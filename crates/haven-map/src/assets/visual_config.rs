use std::collections::HashMap;
use std::f32::consts::FRAC_PI_4;
use serde::{Deserialize, Serialize};

use crate::api::types::CelestialType;

/// Mesh geometry used for a celestial type. Unknown names fall back to a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Octahedron,
    Box,
    #[default]
    #[serde(other)]
    Sphere,
}

/// Rendering parameters for one celestial type.
/// Colors are `0xRRGGBB` integers, as in the page-side config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeVisual {
    #[serde(default)]
    pub geometry: GeometryKind,
    pub size: f32,
    pub color: u32,
    #[serde(default)]
    pub emissive: Option<u32>,
    #[serde(default)]
    pub emissive_intensity: Option<f32>,
    /// Material opacity (default: 0.95).
    #[serde(default)]
    pub opacity: Option<f32>,
    #[serde(default)]
    pub glow_size: Option<f32>,
    #[serde(default)]
    pub glow_color: Option<u32>,
    #[serde(default)]
    pub glow_opacity: Option<f32>,
    /// Radius of the invisible pick collider. Absent or zero = no proxy.
    #[serde(default)]
    pub hit_radius: Option<f32>,
    /// Static Euler rotation (XYZ, radians).
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    #[serde(default)]
    pub show_label: bool,
}

impl TypeVisual {
    pub const DEFAULT_OPACITY: f32 = 0.95;
    pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 0.2;

    pub fn new(geometry: GeometryKind, size: f32, color: u32) -> Self {
        Self {
            geometry,
            size,
            color,
            emissive: None,
            emissive_intensity: None,
            opacity: None,
            glow_size: None,
            glow_color: None,
            glow_opacity: None,
            hit_radius: None,
            rotation: None,
            show_label: false,
        }
    }

    pub fn with_emissive(mut self, emissive: u32, intensity: f32) -> Self {
        self.emissive = Some(emissive);
        self.emissive_intensity = Some(intensity);
        self
    }

    pub fn with_glow(mut self, size: f32, color: u32, opacity: f32) -> Self {
        self.glow_size = Some(size);
        self.glow_color = Some(color);
        self.glow_opacity = Some(opacity);
        self
    }

    pub fn with_hit_radius(mut self, radius: f32) -> Self {
        self.hit_radius = Some(radius);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_label(mut self) -> Self {
        self.show_label = true;
        self
    }

    pub fn effective_opacity(&self) -> f32 {
        self.opacity.unwrap_or(Self::DEFAULT_OPACITY)
    }

    /// Emissive intensity, only when an emissive color is configured.
    pub fn effective_emissive_intensity(&self) -> Option<f32> {
        self.emissive.map(|_| {
            self.emissive_intensity
                .filter(|i| *i != 0.0)
                .unwrap_or(Self::DEFAULT_EMISSIVE_INTENSITY)
        })
    }

    pub fn effective_hit_radius(&self) -> Option<f32> {
        self.hit_radius.filter(|r| *r > 0.0)
    }
}

/// Type name → visual parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualConfig {
    types: HashMap<String, TypeVisual>,
}

impl VisualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config map from a JSON object keyed by type name.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The stock table shipped with the map page.
    pub fn haven_default() -> Self {
        let mut config = Self::new();
        config.insert(
            CelestialType::Region.as_str(),
            TypeVisual::new(GeometryKind::Octahedron, 1.2, 0x008b8d)
                .with_emissive(0x005f60, 0.15)
                .with_glow(1.8, 0x00ffff, 0.12)
                .with_hit_radius(2.0)
                .with_label(),
        );
        config.insert(
            CelestialType::System.as_str(),
            TypeVisual::new(GeometryKind::Sphere, 0.8, 0x008b8d)
                .with_emissive(0x005f60, 0.15)
                .with_glow(1.2, 0x00ffff, 0.15)
                .with_hit_radius(1.2),
        );
        config.insert(
            CelestialType::Planet.as_str(),
            TypeVisual::new(GeometryKind::Sphere, 0.8, 0x008b8d)
                .with_emissive(0x005f60, 0.15)
                .with_glow(1.2, 0x00ffff, 0.15)
                .with_hit_radius(1.2),
        );
        config.insert(
            CelestialType::Moon.as_str(),
            TypeVisual::new(GeometryKind::Sphere, 0.4, 0xb4b4c8)
                .with_emissive(0x7a7a8a, 0.1)
                .with_opacity(0.9),
        );
        config.insert(
            CelestialType::Station.as_str(),
            TypeVisual::new(GeometryKind::Box, 0.27, 0x9400d3)
                .with_emissive(0x9400d3, 0.4)
                .with_glow(0.38, 0xda70d6, 0.2)
                .with_rotation([FRAC_PI_4, FRAC_PI_4, 0.0]),
        );
        config.insert(
            CelestialType::Sun.as_str(),
            TypeVisual::new(GeometryKind::Sphere, 0.5, 0xffd700),
        );
        config
    }

    pub fn insert(&mut self, type_name: impl Into<String>, visual: TypeVisual) {
        self.types.insert(type_name.into(), visual);
    }

    pub fn remove(&mut self, type_name: &str) -> Option<TypeVisual> {
        self.types.remove(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeVisual> {
        self.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Split a `0xRRGGBB` color into linear [0, 1] channels.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

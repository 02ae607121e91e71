//! Hover tooltips.
//!
//! Each (view mode, type) pair that has a tooltip gets its own variant of
//! `TooltipContent` with its own renderer. Pairs without a variant show
//! nothing.

use glam::Vec2;
use serde::Serialize;

use crate::api::types::{CelestialType, ViewMode};
use crate::assets::dataset::{display_value, format_coord, DomainRecord, SystemMeta};

/// Offset from the pointer to the tooltip's top-left corner.
pub const POINTER_OFFSET: f32 = 14.0;
/// Space reserved for the tooltip box when clamping.
pub const BOX_SIZE: Vec2 = Vec2::new(280.0, 150.0);
/// Minimum gap to the viewport edge.
pub const VIEWPORT_MARGIN: f32 = 8.0;

/// What a hover tooltip shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum TooltipContent {
    GalaxySystem {
        name: String,
        region: String,
        planets: usize,
        moons: usize,
        coords: [String; 3],
    },
    GalaxyRegion {
        name: String,
        systems: Option<u64>,
    },
    Sun {
        system: String,
        region: String,
        planets: usize,
        coords: [String; 3],
    },
    Planet {
        name: String,
        moons: usize,
        sentinel: String,
        fauna: String,
        flora: String,
    },
    Moon {
        name: String,
        sentinel: String,
        fauna: String,
        flora: String,
    },
    Station {
        name: String,
        coords: [String; 3],
    },
}

/// One "Label: value" row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLine {
    pub label: &'static str,
    pub value: String,
}

impl TooltipLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Page-level context some templates read instead of the hovered payload.
#[derive(Debug, Clone, Copy)]
pub struct TooltipContext<'a> {
    pub view_mode: ViewMode,
    pub system_meta: Option<&'a SystemMeta>,
    /// Planet records in the dataset.
    pub planet_count: usize,
}

impl TooltipContent {
    /// Pick and fill the template for a hovered object. `None` when the
    /// (view mode, type) pair has no template.
    pub fn for_object(
        ctx: &TooltipContext<'_>,
        tag: CelestialType,
        name: &str,
        payload: Option<&DomainRecord>,
    ) -> Option<Self> {
        let empty = DomainRecord::default();
        let data = payload.unwrap_or(&empty);
        let name_or = |fallback: &str| {
            if name.is_empty() {
                fallback.to_string()
            } else {
                name.to_string()
            }
        };

        let content = match (ctx.view_mode, tag) {
            (ViewMode::Galaxy, CelestialType::System) => TooltipContent::GalaxySystem {
                name: name_or("Unknown System"),
                region: data.region().unwrap_or("Unknown Region").to_string(),
                planets: data.planets().len(),
                moons: data.nested_moon_count(),
                coords: payload_coords(data),
            },
            (ViewMode::Galaxy, CelestialType::Region) => TooltipContent::GalaxyRegion {
                name: name.to_string(),
                systems: data.get("count").and_then(|v| v.as_u64()),
            },
            (ViewMode::System, CelestialType::Sun) => {
                let meta = ctx.system_meta;
                TooltipContent::Sun {
                    system: meta
                        .and_then(|m| m.name.clone())
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| "Unknown System".to_string()),
                    region: meta
                        .and_then(|m| m.region.clone())
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    planets: ctx.planet_count,
                    coords: [
                        format_coord(meta.and_then(|m| m.x)),
                        format_coord(meta.and_then(|m| m.y)),
                        format_coord(meta.and_then(|m| m.z)),
                    ],
                }
            }
            (ViewMode::System, CelestialType::Planet) => TooltipContent::Planet {
                name: name_or("Unknown Planet"),
                moons: data.moons().len(),
                sentinel: text_or_na(data, "sentinel"),
                fauna: text_or_na(data, "fauna"),
                flora: text_or_na(data, "flora"),
            },
            (ViewMode::System, CelestialType::Moon) => TooltipContent::Moon {
                name: name_or("Unknown Moon"),
                sentinel: text_or_na(data, "sentinel"),
                fauna: text_or_na(data, "fauna"),
                flora: text_or_na(data, "flora"),
            },
            (ViewMode::System, CelestialType::Station) => TooltipContent::Station {
                name: name_or("Space Station"),
                coords: payload_coords(data),
            },
            _ => return None,
        };
        Some(content)
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            TooltipContent::Sun { .. } => Some("⭐"),
            TooltipContent::Planet { .. } => Some("🪐"),
            TooltipContent::Moon { .. } => Some("🌙"),
            TooltipContent::Station { .. } => Some("🛸"),
            TooltipContent::GalaxySystem { .. } | TooltipContent::GalaxyRegion { .. } => None,
        }
    }

    pub fn title(&self) -> String {
        let text = match self {
            TooltipContent::GalaxySystem { name, .. }
            | TooltipContent::GalaxyRegion { name, .. }
            | TooltipContent::Planet { name, .. }
            | TooltipContent::Moon { name, .. }
            | TooltipContent::Station { name, .. } => name.as_str(),
            TooltipContent::Sun { .. } => "Central Star",
        };
        match self.icon() {
            Some(icon) => format!("{icon} {text}"),
            None => text.to_string(),
        }
    }

    pub fn lines(&self) -> Vec<TooltipLine> {
        match self {
            TooltipContent::GalaxySystem {
                region,
                planets,
                moons,
                coords,
                ..
            } => vec![
                TooltipLine::new("Region", region.as_str()),
                TooltipLine::new("Planets", planets.to_string()),
                TooltipLine::new("Moons", moons.to_string()),
                TooltipLine::new("Coords", coords_text(coords)),
            ],
            TooltipContent::GalaxyRegion { systems, .. } => systems
                .map(|count| TooltipLine::new("Systems", count.to_string()))
                .into_iter()
                .collect(),
            TooltipContent::Sun {
                system,
                region,
                planets,
                coords,
            } => vec![
                TooltipLine::new("System", system.as_str()),
                TooltipLine::new("Region", region.as_str()),
                TooltipLine::new("Planets", planets.to_string()),
                TooltipLine::new("Coords", coords_text(coords)),
            ],
            TooltipContent::Planet {
                moons,
                sentinel,
                fauna,
                flora,
                ..
            } => vec![
                TooltipLine::new("Moons", moons.to_string()),
                TooltipLine::new("Sentinel", sentinel.as_str()),
                TooltipLine::new("Fauna", fauna.as_str()),
                TooltipLine::new("Flora", flora.as_str()),
            ],
            TooltipContent::Moon {
                sentinel,
                fauna,
                flora,
                ..
            } => vec![
                TooltipLine::new("Sentinel", sentinel.as_str()),
                TooltipLine::new("Fauna", fauna.as_str()),
                TooltipLine::new("Flora", flora.as_str()),
            ],
            TooltipContent::Station { coords, .. } => {
                vec![TooltipLine::new("Coords", coords_text(coords))]
            }
        }
    }
}

fn text_or_na(data: &DomainRecord, key: &str) -> String {
    data.get(key)
        .and_then(display_value)
        .unwrap_or_else(|| "N/A".to_string())
}

fn payload_coords(data: &DomainRecord) -> [String; 3] {
    ["x", "y", "z"].map(|axis| format_coord(data.number(axis)))
}

fn coords_text(coords: &[String; 3]) -> String {
    format!("({}, {}, {})", coords[0], coords[1], coords[2])
}

/// Top-left corner of the tooltip for a pointer position.
///
/// Overflowing the right edge flips the box to the left of the pointer;
/// overflowing the bottom pins it just above the bottom margin.
pub fn placement(pointer: Vec2, viewport: Vec2) -> Vec2 {
    let mut pos = pointer + Vec2::splat(POINTER_OFFSET);
    if pos.x + BOX_SIZE.x > viewport.x - VIEWPORT_MARGIN {
        pos.x = pointer.x - BOX_SIZE.x - POINTER_OFFSET;
    }
    if pos.y + BOX_SIZE.y > viewport.y - VIEWPORT_MARGIN {
        pos.y = viewport.y - BOX_SIZE.y - VIEWPORT_MARGIN;
    }
    pos
}

/// A positioned, rendered tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub left: f32,
    pub top: f32,
    pub title: String,
    pub lines: Vec<TooltipLine>,
    pub content: TooltipContent,
}

impl Tooltip {
    pub fn new(content: TooltipContent, pointer: Vec2, viewport: Vec2) -> Self {
        let pos = placement(pointer, viewport);
        Self {
            left: pos.x,
            top: pos.y,
            title: content.title(),
            lines: content.lines(),
            content,
        }
    }
}

//! Selection, planet highlighting and the detail panel.

use serde::Serialize;
use serde_json::Value;

use crate::api::types::{CelestialType, ObjectId};
use crate::assets::dataset::{display_value, DomainRecord, SystemMeta};
use crate::core::scene::Scene;
use crate::systems::navigation::resolve_photo_href;

/// Intensity restored when a highlighted planet has no recorded original.
pub const FALLBACK_INTENSITY: f32 = 0.3;
/// Intensity of the selected planet.
pub const HIGHLIGHT_INTENSITY: f32 = 1.0;

/// Fields shown first, in this order, when present.
const PRIORITY_FIELDS: [&str; 5] = ["type", "id", "region", "system", "attributes"];
/// Fields never shown as plain rows.
const SKIP_FIELDS: [&str; 10] = [
    "name",
    "x",
    "y",
    "z",
    "planets",
    "photo",
    "moons",
    "space_station",
    "space_stations",
    "count",
];

/// Tracks the single selected object and its highlight.
///
/// A highlighted planet always gets its recorded intensity back before
/// anything else is highlighted or the selection is cleared.
#[derive(Debug, Default)]
pub struct SelectionModel {
    selected: Option<ObjectId>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Select `id`, restoring the previous selection's highlight first.
    /// Returns the previously selected object.
    pub fn select(&mut self, scene: &mut Scene, id: ObjectId) -> Option<ObjectId> {
        let previous = self.selected.take();
        if let Some(prev) = previous {
            restore_highlight(scene, prev);
        }
        self.selected = Some(id);
        apply_highlight(scene, id);
        log::debug!("selected {:?} (previous {:?})", id, previous);
        previous
    }

    /// Clear the selection. Returns what was selected.
    pub fn clear(&mut self, scene: &mut Scene) -> Option<ObjectId> {
        let previous = self.selected.take();
        if let Some(prev) = previous {
            restore_highlight(scene, prev);
            log::debug!("selection cleared");
        }
        previous
    }
}

fn restore_highlight(scene: &mut Scene, id: ObjectId) {
    let Some(node) = scene.get_mut(id) else { return };
    if node.tag != Some(CelestialType::Planet) {
        return;
    }
    let original = node.original_intensity.unwrap_or(FALLBACK_INTENSITY);
    node.set_emissive_intensity(original);
}

fn apply_highlight(scene: &mut Scene, id: ObjectId) {
    let Some(node) = scene.get_mut(id) else { return };
    if node.tag != Some(CelestialType::Planet) {
        return;
    }
    if let Some(current) = node.emissive_intensity() {
        node.original_intensity = Some(current);
        node.set_emissive_intensity(HIGHLIGHT_INTENSITY);
    }
}

/// One "Label: value" row of the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

impl DetailField {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Page-level inputs to the detail panel.
#[derive(Debug, Clone, Copy)]
pub struct DetailContext<'a> {
    pub system_meta: Option<&'a SystemMeta>,
    /// Planet records in the dataset.
    pub planet_count: usize,
    /// Path of the hosting page, for photo links.
    pub page_path: &'a str,
}

/// Content of the detail panel for a selected object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub heading: &'static str,
    pub fields: Vec<DetailField>,
    /// Nested planet names, with moon counts for object entries.
    pub planets: Vec<String>,
    /// Nested moon names (planet details only).
    pub moons: Vec<String>,
    pub photo: Option<String>,
}

impl DetailPanel {
    pub fn heading_for(tag: Option<CelestialType>) -> &'static str {
        match tag {
            Some(CelestialType::Sun) => "System Details",
            Some(CelestialType::Planet) => "Planet Details",
            Some(CelestialType::Moon) => "Moon Details",
            _ => "Details",
        }
    }

    pub fn for_object(
        ctx: &DetailContext<'_>,
        tag: Option<CelestialType>,
        payload: Option<&DomainRecord>,
    ) -> Self {
        let heading = Self::heading_for(tag);
        if tag == Some(CelestialType::Sun) {
            if let Some(meta) = ctx.system_meta {
                return Self::for_system(heading, meta, ctx.planet_count);
            }
        }

        let empty = DomainRecord::default();
        let data = payload.unwrap_or(&empty);

        let mut fields = Vec::new();
        for key in PRIORITY_FIELDS {
            if let Some(value) = data.get(key).and_then(display_value) {
                fields.push(DetailField::new(field_label(key), value));
            }
        }
        for (key, value) in data.fields() {
            if PRIORITY_FIELDS.contains(&key.as_str()) || SKIP_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if let Some(value) = display_value(value) {
                fields.push(DetailField::new(field_label(key), value));
            }
        }

        let planets = data.planets().iter().filter_map(planet_entry).collect();
        let moons = if tag == Some(CelestialType::Planet) {
            data.moons().iter().map(moon_entry).collect()
        } else {
            Vec::new()
        };
        let photo = data
            .str_field("photo")
            .and_then(|p| resolve_photo_href(p, ctx.page_path));

        Self {
            heading,
            fields,
            planets,
            moons,
            photo,
        }
    }

    fn for_system(heading: &'static str, meta: &SystemMeta, planet_count: usize) -> Self {
        let mut fields = vec![
            DetailField::new("Name", meta.name.clone().unwrap_or_default()),
            DetailField::new("Region", meta.region.clone().unwrap_or_default()),
        ];
        if let Some(attributes) = meta.attributes.as_ref().and_then(display_value) {
            fields.push(DetailField::new("System Attributes", attributes));
        }
        if let Some((x, y, z)) = meta.coordinates() {
            fields.push(DetailField::new("Coordinates", format!("({x}, {y}, {z})")));
        }
        fields.push(DetailField::new("Planets", planet_count.to_string()));

        Self {
            heading,
            fields,
            planets: Vec::new(),
            moons: Vec::new(),
            photo: None,
        }
    }
}

/// `planet_type` → `Planet type`.
pub fn field_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace('_', " ");
            format!("{}{}", first.to_uppercase(), rest)
        }
        None => String::new(),
    }
}

fn planet_entry(entry: &Value) -> Option<String> {
    match entry {
        Value::String(name) => Some(name.clone()),
        Value::Object(planet) => {
            let name = planet.get("name").and_then(Value::as_str).filter(|n| !n.is_empty())?;
            let moons = planet
                .get("moons")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            let noun = if moons == 1 { "moon" } else { "moons" };
            Some(format!("{name} ({moons} {noun})"))
        }
        _ => None,
    }
}

fn moon_entry(entry: &Value) -> String {
    match entry {
        Value::String(name) => name.clone(),
        Value::Object(moon) => moon
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .unwrap_or("Moon")
            .to_string(),
        _ => "Moon".to_string(),
    }
}

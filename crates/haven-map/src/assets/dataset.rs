use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::types::CelestialType;
use crate::core::error::SceneError;

/// Ordered domain fields of a record, kept exactly as they arrived.
pub type Payload = Map<String, Value>;

/// One entity record from the dataset. Any fields beyond the well-known ones
/// are carried through untouched for the detail panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainRecord {
    fields: Payload,
}

impl DomainRecord {
    pub fn new(fields: Payload) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value. Non-objects are rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Payload {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field, treating empty strings as absent.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Declared type name; records without one are systems.
    pub fn type_name(&self) -> &str {
        self.str_field("type").unwrap_or(CelestialType::System.as_str())
    }

    pub fn celestial_type(&self) -> Option<CelestialType> {
        CelestialType::parse(self.type_name())
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn region(&self) -> Option<&str> {
        self.str_field("region")
    }

    /// World position; missing coordinates are zero.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.number("x").unwrap_or(0.0) as f32,
            self.number("y").unwrap_or(0.0) as f32,
            self.number("z").unwrap_or(0.0) as f32,
        )
    }

    pub fn planets(&self) -> &[Value] {
        array_field(&self.fields, "planets")
    }

    pub fn moons(&self) -> &[Value] {
        array_field(&self.fields, "moons")
    }

    /// Total moons across this record's object-form planet entries.
    pub fn nested_moon_count(&self) -> usize {
        self.planets()
            .iter()
            .filter_map(Value::as_object)
            .map(|planet| array_field(planet, "moons").len())
            .sum()
    }
}

fn array_field<'a>(fields: &'a Payload, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The ordered record list a map page is built from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DomainRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records. Entries that are not objects are
    /// dropped and returned alongside the dataset.
    pub fn from_json(json: &str) -> Result<(Self, Vec<SceneError>), SceneError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self::from_values(values))
    }

    pub fn from_values(values: Vec<Value>) -> (Self, Vec<SceneError>) {
        let mut records = Vec::with_capacity(values.len());
        let mut errors = Vec::new();
        for (index, value) in values.into_iter().enumerate() {
            match DomainRecord::from_value(value) {
                Some(record) => records.push(record),
                None => errors.push(SceneError::MalformedRecord { index }),
            }
        }
        (Self { records }, errors)
    }

    pub fn records(&self) -> &[DomainRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of explicitly typed planet records.
    pub fn planet_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.str_field("type") == Some(CelestialType::Planet.as_str()))
            .count()
    }
}

/// Metadata about the system shown in system view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub attributes: Option<Value>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
}

impl SystemMeta {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// All three coordinates, when every one of them is known.
    pub fn coordinates(&self) -> Option<(f64, f64, f64)> {
        Some((self.x?, self.y?, self.z?))
    }
}

/// Render a payload value as panel text. Null and empty strings render as nothing.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(display_number(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| display_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Integers as written; floats in their shortest form, so `1.0` shows as `1`.
fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Format an optional coordinate with one decimal, or "N/A".
pub fn format_coord(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "N/A".to_string(),
    }
}

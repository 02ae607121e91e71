use serde::{Deserialize, Serialize};

use crate::systems::selection::DetailPanel;
use crate::systems::tooltip::Tooltip;

/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectId(pub u32);

/// The kind of celestial entity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialType {
    Region,
    System,
    Planet,
    Moon,
    Station,
    Sun,
}

impl CelestialType {
    pub const ALL: [CelestialType; 6] = [
        CelestialType::Region,
        CelestialType::System,
        CelestialType::Planet,
        CelestialType::Moon,
        CelestialType::Station,
        CelestialType::Sun,
    ];

    /// Type name as it appears in datasets and visual config keys.
    pub fn as_str(self) -> &'static str {
        match self {
            CelestialType::Region => "region",
            CelestialType::System => "system",
            CelestialType::Planet => "planet",
            CelestialType::Moon => "moon",
            CelestialType::Station => "station",
            CelestialType::Sun => "sun",
        }
    }

    /// Parse a dataset type name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Top-level rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Overview of every star system.
    #[default]
    Galaxy,
    /// A single system: central star, planets, moons, stations.
    System,
}

/// Global system-label mode (galaxy view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    #[default]
    Off,
    On,
}

impl LabelMode {
    pub fn toggled(self) -> Self {
        match self {
            LabelMode::Off => LabelMode::On,
            LabelMode::On => LabelMode::Off,
        }
    }
}

/// UI event emitted by the map for the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    /// Pointer hover result. `None` hides the tooltip.
    Hover { tooltip: Option<Tooltip> },
    /// Selection changed. `None` means the selection was cleared.
    Selection { detail: Option<DetailPanel> },
    /// The user asked to open another page (galaxy → system drill-down).
    Navigate { slug: String, href: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celestial_type_round_trips_names() {
        for t in CelestialType::ALL {
            assert_eq!(CelestialType::parse(t.as_str()), Some(t));
        }
        assert_eq!(CelestialType::parse("nebula"), None);
        assert_eq!(CelestialType::parse("Planet"), None);
    }

    #[test]
    fn label_mode_toggles() {
        assert_eq!(LabelMode::Off.toggled(), LabelMode::On);
        assert_eq!(LabelMode::On.toggled(), LabelMode::Off);
    }

    #[test]
    fn navigate_event_serializes_with_tag() {
        let event = MapEvent::Navigate {
            slug: "Alpha".into(),
            href: "system_Alpha.html".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "navigate");
        assert_eq!(json["href"], "system_Alpha.html");
    }
}

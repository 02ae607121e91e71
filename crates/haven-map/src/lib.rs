pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::MapConfig;
pub use api::state::AppState;
pub use api::types::{CelestialType, LabelMode, MapEvent, ObjectId, ViewMode};
pub use assets::dataset::{Dataset, DomainRecord, SystemMeta};
pub use assets::visual_config::{GeometryKind, TypeVisual, VisualConfig};
pub use components::label::LabelEntry;
pub use components::mesh::{Material, MeshComponent, Shape};
pub use components::node::{NodeKind, SceneNode};
pub use core::error::SceneError;
pub use core::runner::MapRunner;
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use renderer::camera::{CameraController, CameraState, KeyMove, Ray};
pub use renderer::instance::{InstanceBuffer, MeshInstance};
pub use input::interaction::{PointerAction, PointerTracker};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use systems::hud::HudValues;
pub use systems::labels::LabelDeclutterer;
pub use systems::orbits::{MoonOrbit, OrbitalMotionSimulator};
pub use systems::picking::{Hit, PickingService, Purpose};
pub use systems::scene_builder::{BuildReport, MapScene, SceneBuilder};
pub use systems::selection::{DetailPanel, SelectionModel};
pub use systems::tooltip::{Tooltip, TooltipContent};

pub use extensions::{LocalTransform, TransformGraph};

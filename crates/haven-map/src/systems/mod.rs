pub mod hud;
pub mod labels;
pub mod navigation;
pub mod orbits;
pub mod picking;
pub mod render;
pub mod scene_builder;
pub mod selection;
pub mod tooltip;

use serde::Serialize;

use crate::renderer::camera::CameraState;

/// Edge length of the reference grid, in world units.
pub const GRID_SIZE: f32 = 200.0;
/// Major divisions across the grid.
pub const GRID_DIVISIONS: u32 = 16;

/// Per-frame values for the compass and scale overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudValues {
    /// Camera heading in radians, `atan2(dir.x, dir.z)`.
    pub heading: f32,
    /// World units per major grid cell.
    pub grid_cell: f32,
    pub grid_visible: bool,
    pub visible_labels: usize,
}

impl HudValues {
    pub fn compute(camera: &CameraState, grid_visible: bool, visible_labels: usize) -> Self {
        Self {
            heading: camera.heading(),
            grid_cell: GRID_SIZE / GRID_DIVISIONS as f32,
            grid_visible,
            visible_labels,
        }
    }
}

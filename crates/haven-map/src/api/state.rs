use crate::api::types::LabelMode;
use crate::input::interaction::PointerTracker;
use crate::systems::selection::SelectionModel;

/// Runtime UI state shared by the per-frame systems.
/// Passed explicitly; nothing here is global.
pub struct AppState {
    pub label_mode: LabelMode,
    /// Grid and orbit rings, toggled together.
    pub decorations_visible: bool,
    pub auto_rotate: bool,
    pub pointer: PointerTracker,
    pub selection: SelectionModel,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl AppState {
    pub fn new(viewport_width: f32, viewport_height: f32, drag_threshold: f32) -> Self {
        Self {
            label_mode: LabelMode::Off,
            decorations_visible: true,
            auto_rotate: false,
            pointer: PointerTracker::new(drag_threshold),
            selection: SelectionModel::new(),
            viewport_width,
            viewport_height,
        }
    }

    pub fn toggle_labels(&mut self) -> LabelMode {
        self.label_mode = self.label_mode.toggled();
        self.label_mode
    }

    pub fn toggle_decorations(&mut self) -> bool {
        self.decorations_visible = !self.decorations_visible;
        self.decorations_visible
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport_height > 0.0 {
            self.viewport_width / self.viewport_height
        } else {
            1.0
        }
    }
}

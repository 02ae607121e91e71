//! Pointer gesture tracking.
//!
//! Turns raw pointer events into camera drags, hover probes and clicks.
//! A press that travels further than the drag threshold is a drag and never
//! produces a click.

use glam::Vec2;

use crate::input::queue::PointerButton;

/// What the runner should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    None,
    /// Button held while moving: orbit (primary) or pan (secondary) by `delta`.
    Drag { button: PointerButton, delta: Vec2 },
    /// Free pointer movement; probe the scene at `pos`.
    Hover { pos: Vec2 },
    /// Press and release without dragging.
    Click { pos: Vec2 },
    /// Pointer left the canvas; hide the tooltip.
    Leave,
}

/// Tracks the current pointer gesture.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    pressed: Option<PointerButton>,
    start: Vec2,
    last: Vec2,
    dragged: bool,
    drag_threshold: f32,
}

impl PointerTracker {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            pressed: None,
            start: Vec2::ZERO,
            last: Vec2::ZERO,
            dragged: false,
            drag_threshold,
        }
    }

    pub fn on_pointer_down(&mut self, pos: Vec2, button: PointerButton) -> PointerAction {
        self.pressed = Some(button);
        self.start = pos;
        self.last = pos;
        self.dragged = false;
        PointerAction::None
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) -> PointerAction {
        let Some(button) = self.pressed else {
            return PointerAction::Hover { pos };
        };

        let delta = pos - self.last;
        self.last = pos;
        if (pos - self.start).length() > self.drag_threshold {
            self.dragged = true;
        }
        PointerAction::Drag { button, delta }
    }

    pub fn on_pointer_up(&mut self, pos: Vec2) -> PointerAction {
        let was_pressed = self.pressed.take().is_some();
        let travelled = (pos - self.start).length();
        let dragged = std::mem::take(&mut self.dragged) || travelled > self.drag_threshold;

        if was_pressed && !dragged {
            PointerAction::Click { pos }
        } else {
            PointerAction::None
        }
    }

    /// Leaving the canvas cancels any press in progress.
    pub fn on_pointer_leave(&mut self) -> PointerAction {
        self.pressed = None;
        self.dragged = false;
        PointerAction::Leave
    }
}

/// Pointer button that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbits the camera.
    Primary,
    /// Pans the camera.
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value. Middle and extra buttons are ignored.
    pub fn from_dom(button: u32) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Input events the map understands. Coordinates are viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Pointer left the canvas.
    PointerLeave,
    Wheel { delta_y: f32 },
    KeyDown { key: char },
    /// Viewport resized, in pixels.
    Resize { width: f32, height: f32 },
    /// The page's label toggle button.
    ToggleLabels,
    /// The page's grid toggle button (grid plus orbit rings).
    ToggleDecorations,
    SetAutoRotate { enabled: bool },
}

/// A queue of input events.
/// The page pushes events as they arrive; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

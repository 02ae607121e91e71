//! Browser bridge for the Haven map.
//!
//! One `MapRunner` lives in a `thread_local!`; the page calls `map_init`
//! once, forwards DOM input through the `map_*` functions, calls `map_tick`
//! from `requestAnimationFrame`, then reads the instance buffer straight out
//! of wasm memory and the frame's events and HUD values as JSON.

use std::cell::RefCell;

use glam::Vec2;
use haven_map::{InputEvent, MapRunner, PointerButton};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<MapRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Calls made before `map_init` are logged and
/// return `None`.
fn with_runner<R>(f: impl FnOnce(&mut MapRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("map not initialized, call map_init() first");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Build the map from the page's embedded JSON. `meta_json` may be empty
/// (galaxy view).
#[wasm_bindgen]
pub fn map_init(
    config_json: &str,
    visuals_json: &str,
    dataset_json: &str,
    meta_json: &str,
) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let meta = (!meta_json.trim().is_empty()).then_some(meta_json);
    let runner = MapRunner::from_json(config_json, visuals_json, dataset_json, meta)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let report = &runner.map().report;
    log::info!(
        "haven map: initialized ({:?} view, {} warnings)",
        runner.config().view_mode,
        report.errors.len()
    );

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn map_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

/// `button` is the DOM `MouseEvent.button`; buttons other than primary and
/// secondary are ignored.
#[wasm_bindgen]
pub fn map_pointer_down(x: f32, y: f32, button: u32) {
    if let Some(button) = PointerButton::from_dom(button) {
        push(InputEvent::PointerDown { x, y, button });
    }
}

#[wasm_bindgen]
pub fn map_pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn map_pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn map_pointer_leave() {
    push(InputEvent::PointerLeave);
}

#[wasm_bindgen]
pub fn map_wheel(delta_y: f32) {
    push(InputEvent::Wheel { delta_y });
}

/// `key` is the DOM `KeyboardEvent.key`; only single characters are used.
#[wasm_bindgen]
pub fn map_key_down(key: &str) {
    let mut chars = key.chars();
    if let (Some(key), None) = (chars.next(), chars.next()) {
        push(InputEvent::KeyDown { key });
    }
}

#[wasm_bindgen]
pub fn map_resize(width: f32, height: f32) {
    push(InputEvent::Resize { width, height });
}

#[wasm_bindgen]
pub fn map_toggle_labels() {
    push(InputEvent::ToggleLabels);
}

#[wasm_bindgen]
pub fn map_toggle_decorations() {
    push(InputEvent::ToggleDecorations);
}

#[wasm_bindgen]
pub fn map_set_auto_rotate(enabled: bool) {
    push(InputEvent::SetAutoRotate { enabled });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances().instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instances().instance_count()).unwrap_or(0)
}

/// Index of the first decoration instance (outline shells, orbit rings).
#[wasm_bindgen]
pub fn get_decoration_split() -> u32 {
    with_runner(|r| r.instances().decoration_split).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    haven_map::MeshInstance::FLOATS as u32
}

/// Hover, selection and navigation events from the last tick.
#[wasm_bindgen]
pub fn get_events_json() -> String {
    with_runner(|r| r.events_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_hud_json() -> String {
    with_runner(|r| r.hud_json()).unwrap_or_else(|| "{}".to_string())
}

/// Column-major view-projection matrix for the page renderer.
#[wasm_bindgen]
pub fn get_view_projection() -> Vec<f32> {
    with_runner(|r| r.camera().state().view_projection().to_cols_array().to_vec()).unwrap_or_default()
}

/// Screen position and visibility of every label: `[x, y, visible, ...]`.
/// Labels behind the camera are reported as hidden.
#[wasm_bindgen]
pub fn get_labels() -> Vec<f32> {
    with_runner(|r| {
        let viewport = Vec2::new(r.state().viewport_width, r.state().viewport_height);
        let camera = r.camera().state();
        r.map()
            .labels
            .iter()
            .flat_map(|l| match camera.project_to_screen(l.position, viewport) {
                Some(screen) => [screen.x, screen.y, if l.visible { 1.0 } else { 0.0 }],
                None => [0.0, 0.0, 0.0],
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Label texts, in the same order as `get_labels`.
#[wasm_bindgen]
pub fn get_label_texts_json() -> String {
    with_runner(|r| {
        let texts: Vec<&str> = r.map().labels.iter().map(|l| l.text.as_str()).collect();
        serde_json::to_string(&texts).unwrap_or_else(|_| "[]".to_string())
    })
    .unwrap_or_else(|| "[]".to_string())
}

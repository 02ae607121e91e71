use glam::{Vec2, Vec3};

use crate::api::config::MapConfig;
use crate::api::state::AppState;
use crate::api::types::{CelestialType, LabelMode, MapEvent, ObjectId, ViewMode};
use crate::assets::dataset::{Dataset, SystemMeta};
use crate::assets::visual_config::VisualConfig;
use crate::core::error::SceneError;
use crate::core::time::FrameClock;
use crate::input::interaction::PointerAction;
use crate::input::queue::{InputEvent, InputQueue, PointerButton};
use crate::renderer::camera::{CameraController, KeyMove};
use crate::renderer::instance::InstanceBuffer;
use crate::systems::hud::HudValues;
use crate::systems::labels::LabelDeclutterer;
use crate::systems::navigation::{slug, system_page};
use crate::systems::picking::{PickingService, Purpose};
use crate::systems::render::build_instance_buffer;
use crate::systems::scene_builder::{MapScene, SceneBuilder};
use crate::systems::selection::{DetailContext, DetailPanel};
use crate::systems::tooltip::{Tooltip, TooltipContent, TooltipContext};

/// Cosmetic spin of the central star, radians per frame.
const SUN_SPIN: f32 = 0.001;
/// Cosmetic spin of planets (system view) and region markers, radians per frame.
const BODY_SPIN: f32 = 0.003;

/// Drives one map page.
///
/// The host pushes input events whenever they happen and calls `tick` once
/// per display refresh. Each tick applies the queued input, advances the
/// camera and moons, declutters labels and rebuilds the instance buffer.
/// Events produced by a tick stay readable until the next one.
pub struct MapRunner {
    config: MapConfig,
    dataset: Dataset,
    meta: Option<SystemMeta>,
    state: AppState,
    camera: CameraController,
    input: InputQueue,
    clock: FrameClock,
    map: MapScene,
    declutterer: LabelDeclutterer,
    /// Bodies that get the per-frame cosmetic spin.
    spinning: Vec<ObjectId>,
    tooltip_shown: bool,
    events: Vec<MapEvent>,
    hud: HudValues,
    instances: InstanceBuffer,
}

impl MapRunner {
    pub fn new(config: MapConfig, visuals: VisualConfig, dataset: Dataset, meta: Option<SystemMeta>) -> Self {
        let map = SceneBuilder::new(&visuals, &config).build(&dataset);
        let state = AppState::new(config.viewport_width, config.viewport_height, config.drag_threshold);

        let mut camera = CameraController::new(state.aspect());
        if let Some((position, target)) = map.camera_preset {
            camera.set_pose(position, target);
        }

        let spinning = match config.view_mode {
            ViewMode::System => map.scene.bodies(CelestialType::Planet).map(|n| n.id).collect(),
            ViewMode::Galaxy => map.regions.clone(),
        };

        let mut runner = Self {
            declutterer: LabelDeclutterer::new(config.label_limit, config.label_max_distance, config.label_lift),
            clock: FrameClock::new(config.max_frame_dt),
            hud: HudValues::compute(camera.state(), state.decorations_visible, 0),
            config,
            dataset,
            meta,
            state,
            camera,
            input: InputQueue::new(),
            map,
            spinning,
            tooltip_shown: false,
            events: Vec::new(),
            instances: InstanceBuffer::new(),
        };
        runner.rebuild_instances();
        runner
    }

    /// Build a runner from the JSON documents a map page embeds.
    /// A blank visual config selects the stock table; non-object dataset
    /// entries are skipped with a warning.
    pub fn from_json(
        config_json: &str,
        visuals_json: &str,
        dataset_json: &str,
        meta_json: Option<&str>,
    ) -> Result<Self, SceneError> {
        let config = MapConfig::from_json(config_json)?;
        let visuals = if visuals_json.trim().is_empty() {
            VisualConfig::haven_default()
        } else {
            VisualConfig::from_json(visuals_json)?
        };
        let (dataset, skipped) = Dataset::from_json(dataset_json)?;
        for error in &skipped {
            log::warn!("{error}");
        }
        let meta = meta_json.map(SystemMeta::from_json).transpose()?;
        Ok(Self::new(config, visuals, dataset, meta))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame. `frame_dt` is the wall-clock time since the last tick.
    pub fn tick(&mut self, frame_dt: f32) {
        self.events.clear();
        let dt = self.clock.advance(frame_dt);

        for event in self.input.drain() {
            self.handle_input(event);
        }

        self.camera.auto_rotate = self.state.auto_rotate;
        self.camera.apply_frame();

        self.spin();
        self.map.orbits.update(dt, &mut self.map.graph);
        self.sync_decorations();
        self.map.graph.propagate(&mut self.map.scene);

        let labels_enabled =
            self.config.view_mode == ViewMode::Galaxy && self.state.label_mode == LabelMode::On;
        let visible_labels = self.declutterer.update(
            &mut self.map.labels,
            &self.map.scene,
            self.camera.position(),
            labels_enabled,
        );

        self.hud = HudValues::compute(self.camera.state(), self.state.decorations_visible, visible_labels);
        self.rebuild_instances();
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, button } => {
                self.state.pointer.on_pointer_down(Vec2::new(x, y), button);
            }
            InputEvent::PointerMove { x, y } => match self.state.pointer.on_pointer_move(Vec2::new(x, y)) {
                PointerAction::Drag { button, delta } => {
                    match button {
                        PointerButton::Primary => self.camera.queue_orbit(delta.x, delta.y),
                        PointerButton::Secondary => self.camera.queue_pan(delta.x, delta.y),
                    }
                    self.hide_tooltip();
                }
                PointerAction::Hover { pos } => self.hover(pos),
                _ => {}
            },
            InputEvent::PointerUp { x, y } => {
                if let PointerAction::Click { pos } = self.state.pointer.on_pointer_up(Vec2::new(x, y)) {
                    self.click(pos);
                }
            }
            InputEvent::PointerLeave => {
                self.state.pointer.on_pointer_leave();
                self.hide_tooltip();
            }
            InputEvent::Wheel { delta_y } => self.camera.queue_zoom(delta_y),
            InputEvent::KeyDown { key } => {
                if let Some(key) = KeyMove::from_key(key) {
                    self.camera.queue_key(key);
                }
            }
            InputEvent::Resize { width, height } => {
                self.state.viewport_width = width;
                self.state.viewport_height = height;
                self.camera.set_aspect(self.state.aspect());
            }
            InputEvent::ToggleLabels => {
                let mode = self.state.toggle_labels();
                log::debug!("labels {:?}", mode);
            }
            InputEvent::ToggleDecorations => {
                let visible = self.state.toggle_decorations();
                log::debug!("decorations visible: {visible}");
            }
            InputEvent::SetAutoRotate { enabled } => self.state.auto_rotate = enabled,
        }
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.state.viewport_width, self.state.viewport_height)
    }

    fn pick(&self, pos: Vec2, purpose: Purpose) -> Option<ObjectId> {
        let hit = self.map.picking.pick(
            pos,
            self.viewport(),
            self.camera.state(),
            &self.map.scene,
            &self.map.graph,
        )?;
        PickingService::resolve(hit.node, purpose, &self.map.scene, &self.map.graph)
    }

    fn hover(&mut self, pos: Vec2) {
        let ctx = TooltipContext {
            view_mode: self.config.view_mode,
            system_meta: self.meta.as_ref(),
            planet_count: self.dataset.planet_count(),
        };
        let content = self
            .pick(pos, Purpose::Hover)
            .and_then(|id| self.map.scene.get(id))
            .and_then(|node| {
                TooltipContent::for_object(&ctx, node.tag?, &node.name, node.payload.as_deref())
            });

        match content {
            Some(content) => {
                let tooltip = Tooltip::new(content, pos, self.viewport());
                self.tooltip_shown = true;
                self.events.push(MapEvent::Hover { tooltip: Some(tooltip) });
            }
            None => self.hide_tooltip(),
        }
    }

    fn hide_tooltip(&mut self) {
        if std::mem::take(&mut self.tooltip_shown) {
            self.events.push(MapEvent::Hover { tooltip: None });
        }
    }

    fn click(&mut self, pos: Vec2) {
        let target = self.pick(pos, Purpose::Click);
        match self.config.view_mode {
            ViewMode::Galaxy => {
                let Some(node) = target.and_then(|id| self.map.scene.get(id)) else { return };
                if node.tag != Some(CelestialType::System) {
                    return;
                }
                let slug = slug(&node.name);
                let href = system_page(&node.name);
                log::debug!("navigate to {href}");
                self.events.push(MapEvent::Navigate { slug, href });
            }
            ViewMode::System => match target {
                Some(id) => self.select(id),
                None => {
                    self.state.selection.clear(&mut self.map.scene);
                    self.events.push(MapEvent::Selection { detail: None });
                }
            },
        }
    }

    fn select(&mut self, id: ObjectId) {
        self.state.selection.select(&mut self.map.scene, id);
        let Some(node) = self.map.scene.get(id) else { return };
        let ctx = DetailContext {
            system_meta: self.meta.as_ref(),
            planet_count: self.dataset.planet_count(),
            page_path: &self.config.page_path,
        };
        let detail = DetailPanel::for_object(&ctx, node.tag, node.payload.as_deref());
        self.events.push(MapEvent::Selection { detail: Some(detail) });
    }

    fn spin(&mut self) {
        if let Some(sun) = self.map.sun {
            if let Some(local) = self.map.graph.get_local_mut(sun) {
                local.rotation.y += SUN_SPIN;
            }
        }
        for &id in &self.spinning {
            if let Some(local) = self.map.graph.get_local_mut(id) {
                local.rotation += Vec3::Y * BODY_SPIN;
            }
        }
    }

    /// Moon rings and planet orbit rings follow the decorations toggle.
    fn sync_decorations(&mut self) {
        let visible = self.state.decorations_visible;
        self.map.orbits.sync_rings(visible, &mut self.map.scene);
        for &ring in &self.map.planet_rings {
            if let Some(node) = self.map.scene.get_mut(ring) {
                node.visible = visible;
            }
        }
    }

    fn rebuild_instances(&mut self) {
        build_instance_buffer(
            self.map.scene.iter(),
            self.state.selection.selected(),
            &mut self.instances,
        );
    }

    // -- Outputs --

    /// Events produced by the last tick.
    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.events).unwrap_or_else(|e| {
            log::error!("failed to serialize map events: {e}");
            "[]".to_string()
        })
    }

    pub fn hud(&self) -> &HudValues {
        &self.hud
    }

    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.hud).unwrap_or_else(|e| {
            log::error!("failed to serialize HUD values: {e}");
            "{}".to_string()
        })
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn map(&self) -> &MapScene {
        &self.map
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.state.selection.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::NodeKind;
    use serde_json::{json, Value};

    fn runner(config: MapConfig, data: Value) -> MapRunner {
        let Value::Array(values) = data else { panic!("expected array") };
        let (dataset, _) = Dataset::from_values(values);
        MapRunner::new(config, VisualConfig::haven_default(), dataset, None)
    }

    fn screen_pos(runner: &MapRunner, kind: CelestialType, name: &str) -> Vec2 {
        let node = runner.map().scene.find_body(kind, name).unwrap();
        runner
            .camera()
            .state()
            .project_to_screen(node.position, runner.viewport())
            .unwrap()
    }

    fn click_at(runner: &mut MapRunner, pos: Vec2) {
        runner.push_input(InputEvent::PointerDown { x: pos.x, y: pos.y, button: PointerButton::Primary });
        runner.push_input(InputEvent::PointerUp { x: pos.x, y: pos.y });
        runner.tick(1.0 / 60.0);
    }

    fn intensity(runner: &MapRunner, name: &str) -> f32 {
        runner
            .map()
            .scene
            .find_body(CelestialType::Planet, name)
            .and_then(|n| n.emissive_intensity())
            .unwrap()
    }

    fn visible_rings(runner: &MapRunner) -> usize {
        runner
            .map()
            .scene
            .iter()
            .filter(|n| n.kind == NodeKind::OrbitRing && n.visible)
            .count()
    }

    #[test]
    fn planet_with_two_moons_and_ring_toggle() {
        let mut runner = runner(
            MapConfig::system("Sol"),
            json!([{ "type": "planet", "name": "Terra", "moons": ["Luna", "Selene"] }]),
        );
        let scene = &runner.map().scene;
        let interactive_moons = runner
            .map()
            .picking
            .registry()
            .iter()
            .filter(|&&id| scene.get(id).is_some_and(|n| n.is_body(CelestialType::Moon)))
            .count();
        assert_eq!(interactive_moons, 2);

        runner.tick(1.0 / 60.0);
        assert_eq!(visible_rings(&runner), 2);
        let drawn = runner.instances().instance_count();

        runner.push_input(InputEvent::ToggleDecorations);
        runner.tick(1.0 / 60.0);
        assert_eq!(visible_rings(&runner), 0);
        assert_eq!(runner.instances().instance_count(), drawn - 2);
        assert!(!runner.hud().grid_visible);

        runner.tick(1.0 / 60.0);
        assert_eq!(visible_rings(&runner), 0);

        runner.push_input(InputEvent::ToggleDecorations);
        runner.tick(1.0 / 60.0);
        assert_eq!(visible_rings(&runner), 2);
    }

    #[test]
    fn selection_restores_highlight() {
        let mut runner = runner(
            MapConfig::system("Sol"),
            json!([
                { "type": "planet", "name": "A", "x": 20.0 },
                { "type": "planet", "name": "B", "x": -20.0 }
            ]),
        );
        let original = intensity(&runner, "A");

        let a = screen_pos(&runner, CelestialType::Planet, "A");
        click_at(&mut runner, a);
        assert_eq!(intensity(&runner, "A"), 1.0);
        assert!(matches!(
            runner.events(),
            [MapEvent::Selection { detail: Some(d) }] if d.heading == "Planet Details"
        ));

        let b = screen_pos(&runner, CelestialType::Planet, "B");
        click_at(&mut runner, b);
        assert_eq!(intensity(&runner, "A"), original);
        assert_eq!(intensity(&runner, "B"), 1.0);

        click_at(&mut runner, Vec2::new(2.0, 2.0));
        assert!(runner.selected().is_none());
        assert_eq!(intensity(&runner, "B"), original);
        assert!(matches!(runner.events(), [MapEvent::Selection { detail: None }]));
    }

    #[test]
    fn galaxy_click_navigates() {
        let mut runner = runner(
            MapConfig::galaxy(),
            json!([{ "name": "Alpha Centauri-7", "x": 10.0 }]),
        );
        let pos = screen_pos(&runner, CelestialType::System, "Alpha Centauri-7");
        click_at(&mut runner, pos);
        assert!(matches!(
            runner.events(),
            [MapEvent::Navigate { slug, href }]
                if slug == "Alpha_Centauri-7" && href == "system_Alpha_Centauri-7.html"
        ));
        assert!(runner.selected().is_none());
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut runner = runner(MapConfig::galaxy(), json!([{ "name": "Sol", "x": 10.0 }]));
        let pos = screen_pos(&runner, CelestialType::System, "Sol");
        let before = runner.camera().position();
        runner.push_input(InputEvent::PointerDown { x: pos.x, y: pos.y, button: PointerButton::Primary });
        runner.push_input(InputEvent::PointerMove { x: pos.x + 40.0, y: pos.y });
        runner.push_input(InputEvent::PointerUp { x: pos.x + 40.0, y: pos.y });
        runner.tick(1.0 / 60.0);
        assert!(runner.events().is_empty());
        assert_ne!(runner.camera().position(), before);
    }

    #[test]
    fn hover_shows_and_drag_hides_tooltip() {
        let mut runner = runner(
            MapConfig::galaxy(),
            json!([{ "name": "Sol", "region": "Core", "x": 10.0 }]),
        );
        let pos = screen_pos(&runner, CelestialType::System, "Sol");
        runner.push_input(InputEvent::PointerMove { x: pos.x, y: pos.y });
        runner.tick(1.0 / 60.0);
        let [MapEvent::Hover { tooltip: Some(tooltip) }] = runner.events() else {
            panic!("expected a tooltip, got {:?}", runner.events());
        };
        assert!(matches!(&tooltip.content, TooltipContent::GalaxySystem { name, .. } if name == "Sol"));

        runner.push_input(InputEvent::PointerDown { x: pos.x, y: pos.y, button: PointerButton::Primary });
        runner.push_input(InputEvent::PointerMove { x: pos.x + 20.0, y: pos.y });
        runner.tick(1.0 / 60.0);
        assert!(matches!(runner.events(), [MapEvent::Hover { tooltip: None }]));

        // Already hidden: nothing new to report.
        runner.push_input(InputEvent::PointerLeave);
        runner.tick(1.0 / 60.0);
        assert!(runner.events().is_empty());
    }

    #[test]
    fn label_toggle_caps_visible_labels() {
        let systems: Vec<Value> = (0..40)
            .map(|i| json!({ "name": format!("S{i}"), "x": i as f64 }))
            .collect();
        let mut runner = runner(MapConfig::galaxy(), Value::Array(systems));
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.hud().visible_labels, 0);

        runner.push_input(InputEvent::ToggleLabels);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.hud().visible_labels, 30);
        assert_eq!(runner.map().labels.iter().filter(|l| l.visible).count(), 30);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut runner = runner(
            MapConfig::system("Sol"),
            json!([{ "type": "planet", "name": "Terra", "moons": ["Luna"] }]),
        );
        let start = runner.map().orbits.orbits()[0].phase;
        runner.tick(10.0);
        let advanced = runner.map().orbits.orbits()[0].phase;
        let expected = (start + 0.25).rem_euclid(std::f32::consts::TAU);
        assert!((advanced - expected).abs() < 1e-5);
    }

    #[test]
    fn system_view_starts_at_preset() {
        let runner = runner(MapConfig::system("Sol"), json!([]));
        assert!((runner.camera().position() - Vec3::new(67.2, 48.0, 67.2)).length() < 1e-3);
        // Only the central star is drawn.
        assert_eq!(runner.instances().instance_count(), 1);
    }

    #[test]
    fn keys_and_resize_reach_the_camera() {
        let mut runner = runner(MapConfig::galaxy(), json!([]));
        runner.push_input(InputEvent::KeyDown { key: 'q' });
        runner.push_input(InputEvent::Resize { width: 400.0, height: 400.0 });
        runner.tick(1.0 / 60.0);
        assert!((runner.camera().position().y - 48.0).abs() < 1e-4);
        assert_eq!(runner.camera().state().aspect, 1.0);

        runner.push_input(InputEvent::KeyDown { key: 'c' });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.camera().position(), Vec3::splat(50.0));
    }

    #[test]
    fn bad_json_is_reported() {
        let err = MapRunner::from_json("{}", "{}", "not json", None).err().unwrap();
        assert!(matches!(err, SceneError::Dataset(_)));

        let runner = MapRunner::from_json("{}", "{}", r#"[{"name": "Sol"}, 7]"#, None).unwrap();
        // No visual config entries: the record is skipped, nothing is drawn.
        assert_eq!(runner.instances().instance_count(), 0);
        assert_eq!(runner.map().report.errors.len(), 1);
    }

    #[test]
    fn blank_visuals_use_the_stock_table() {
        let runner = MapRunner::from_json("{}", "  ", r#"[{"name": "Sol", "x": 4.0}]"#, None).unwrap();
        assert!(runner.map().report.errors.is_empty());
        assert_eq!(runner.map().systems.len(), 1);
    }

    #[test]
    fn events_serialize_as_a_json_array() {
        let mut runner = runner(MapConfig::galaxy(), json!([{ "name": "Sol", "x": 10.0 }]));
        let pos = screen_pos(&runner, CelestialType::System, "Sol");
        click_at(&mut runner, pos);
        let events: Value = serde_json::from_str(&runner.events_json()).unwrap();
        assert_eq!(events[0]["event"], "navigate");
        let hud: Value = serde_json::from_str(&runner.hud_json()).unwrap();
        assert_eq!(hud["grid_cell"], 12.5);
    }
}

use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

/// Default camera pose, also restored by the reset key.
pub const HOME_POSITION: Vec3 = Vec3::new(50.0, 50.0, 50.0);

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera pose. Only `CameraController` mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Orbit pivot; the camera always looks here.
    pub target: Vec3,
    pub up: Vec3,
    /// Viewport width / height.
    pub aspect: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: HOME_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 10000.0,
        }
    }
}

impl CameraState {
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Unit vector from the camera toward its target.
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// GL-style projection (clip z in [-1, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }

    /// Project a world point to viewport pixels. `None` when behind the camera.
    pub fn project_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }

    /// Compass heading of the view direction, `atan2(dir.x, dir.z)`.
    pub fn heading(&self) -> f32 {
        let dir = self.view_direction();
        dir.x.atan2(dir.z)
    }
}

/// Discrete keyboard camera moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMove {
    Forward,
    Back,
    Left,
    Right,
    Down,
    Up,
    Reset,
}

impl KeyMove {
    /// Map a key (case-insensitive) to a camera move: W/S, A/D, Q/E, C.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(KeyMove::Forward),
            's' => Some(KeyMove::Back),
            'a' => Some(KeyMove::Left),
            'd' => Some(KeyMove::Right),
            'q' => Some(KeyMove::Down),
            'e' => Some(KeyMove::Up),
            'c' => Some(KeyMove::Reset),
            _ => None,
        }
    }
}

/// Camera input accumulated between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraCommands {
    /// Primary-button drag, in pixels.
    pub orbit: Vec2,
    /// Secondary-button drag, in pixels.
    pub pan: Vec2,
    /// Summed wheel deltaY.
    pub zoom: f32,
    pub keys: Vec<KeyMove>,
}

impl CameraCommands {
    pub fn is_empty(&self) -> bool {
        self.orbit == Vec2::ZERO && self.pan == Vec2::ZERO && self.zoom == 0.0 && self.keys.is_empty()
    }
}

/// Orbit camera driven by drag, wheel and keyboard input.
///
/// Input handlers queue commands; `apply_frame` consumes them once per frame
/// in a fixed order: orbit → pan → zoom → auto-rotate → keyboard.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    pending: CameraCommands,
    pub auto_rotate: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CameraController {
    const ORBIT_SENSITIVITY: f32 = 0.005;
    const PAN_FACTOR: f32 = 0.001;
    const ZOOM_SPEED: f32 = 0.05;
    pub const MIN_DISTANCE: f32 = 10.0;
    const KEY_STEP: f32 = 2.0;
    const AUTO_ROTATE_STEP: f32 = 0.002;
    /// Orbit elevation limit in radians, short of the poles where the view
    /// direction would line up with world-up.
    pub const MAX_ELEVATION: f32 = 1.4;

    pub fn new(aspect: f32) -> Self {
        Self {
            state: CameraState {
                aspect,
                ..CameraState::default()
            },
            pending: CameraCommands::default(),
            auto_rotate: false,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn target(&self) -> Vec3 {
        self.state.target
    }

    pub fn pending(&self) -> &CameraCommands {
        &self.pending
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.state.aspect = aspect;
        }
    }

    /// Place the camera explicitly (scene presets).
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.state.position = position;
        self.state.target = target;
    }

    // -- Queued input --

    pub fn queue_orbit(&mut self, dx: f32, dy: f32) {
        self.pending.orbit += Vec2::new(dx, dy);
    }

    pub fn queue_pan(&mut self, dx: f32, dy: f32) {
        self.pending.pan += Vec2::new(dx, dy);
    }

    pub fn queue_zoom(&mut self, delta_y: f32) {
        self.pending.zoom += delta_y;
    }

    pub fn queue_key(&mut self, key: KeyMove) {
        self.pending.keys.push(key);
    }

    /// Apply everything queued since the last frame, plus the auto-rotate tick.
    pub fn apply_frame(&mut self) {
        let commands = std::mem::take(&mut self.pending);

        if commands.orbit != Vec2::ZERO {
            self.orbit(commands.orbit.x, commands.orbit.y);
        }
        if commands.pan != Vec2::ZERO {
            self.pan(commands.pan.x, commands.pan.y);
        }
        if commands.zoom != 0.0 {
            self.zoom(commands.zoom);
        }
        if self.auto_rotate {
            self.auto_rotate_tick();
        }
        for key in commands.keys {
            self.key_move(key);
        }
    }

    // -- Immediate operations --

    /// Rotate about world-up by `dx` and tilt by `dy`, pivoting around the
    /// target. Elevation stays within `±MAX_ELEVATION`.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let rel = self.state.position - self.state.target;
        let distance = rel.length();
        if distance == 0.0 {
            return;
        }
        let azimuth = rel.x.atan2(rel.z) + dx * Self::ORBIT_SENSITIVITY;
        let elevation = rel.y.atan2(Vec2::new(rel.x, rel.z).length()) - dy * Self::ORBIT_SENSITIVITY;
        let elevation = elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);

        let (sin_el, cos_el) = elevation.sin_cos();
        let (sin_az, cos_az) = azimuth.sin_cos();
        self.state.position =
            self.state.target + Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * distance;
    }

    /// Translate camera and target in the world x/y plane, scaled by distance.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let pan_factor = self.state.distance() * Self::PAN_FACTOR;
        let delta = Vec3::new(-dx * pan_factor, dy * pan_factor, 0.0);
        self.state.position += delta;
        self.state.target += delta;
    }

    /// Dolly along the target → camera direction. Distance never drops below 10.
    pub fn zoom(&mut self, delta_y: f32) {
        let rel = self.state.position - self.state.target;
        let direction = rel.normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        let distance = (rel.length() - delta_y * Self::ZOOM_SPEED).max(Self::MIN_DISTANCE);
        self.state.position = self.state.target + direction * distance;
    }

    pub fn auto_rotate_tick(&mut self) {
        let rel = self.state.position - self.state.target;
        let rotated = Quat::from_axis_angle(Vec3::Y, Self::AUTO_ROTATE_STEP) * rel;
        self.state.position = self.state.target + rotated;
    }

    pub fn key_move(&mut self, key: KeyMove) {
        let mut forward = self.state.view_direction();
        forward.y = 0.0;
        let forward = forward.normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let delta = match key {
            KeyMove::Forward => forward * Self::KEY_STEP,
            KeyMove::Back => -forward * Self::KEY_STEP,
            KeyMove::Left => -right * Self::KEY_STEP,
            KeyMove::Right => right * Self::KEY_STEP,
            KeyMove::Down => Vec3::NEG_Y * Self::KEY_STEP,
            KeyMove::Up => Vec3::Y * Self::KEY_STEP,
            KeyMove::Reset => {
                self.reset();
                return;
            }
        };
        self.state.position += delta;
        self.state.target += delta;
    }

    /// Back to the canonical pose: (50, 50, 50) looking at the origin.
    pub fn reset(&mut self) {
        self.state.position = HOME_POSITION;
        self.state.target = Vec3::ZERO;
    }
}

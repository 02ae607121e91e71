use bytemuck::{Pod, Zeroable};

/// Per-instance mesh data read by the page-side renderer.
/// 20 floats = 80 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Radius (sphere, octahedron, ring) or edge length (box).
    pub extent: f32,
    /// Orientation quaternion.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    pub emissive_r: f32,
    pub emissive_g: f32,
    pub emissive_b: f32,
    pub emissive_intensity: f32,
    /// 0 sphere, 1 box, 2 octahedron, 3 ring.
    pub shape: f32,
    /// Bit flags, see `MeshInstance::FLAG_*`.
    pub flags: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Draw back faces only.
    pub const FLAG_BACK_SIDE: u32 = 1;
    /// Currently selected object.
    pub const FLAG_SELECTED: u32 = 2;
}

/// Instance buffer rebuilt every frame.
/// Solid bodies come first; decorations (outline shells, orbit rings)
/// start at `decoration_split`.
pub struct InstanceBuffer {
    pub instances: Vec<MeshInstance>,
    pub decoration_split: u32,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            decoration_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.decoration_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_decoration_split(&mut self, split: u32) {
        self.decoration_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

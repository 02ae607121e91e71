use crate::assets::visual_config::{rgb, GeometryKind, TypeVisual};

/// Mesh shape primitive. Sizes are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Axis-aligned cube before rotation; `size` is the full edge length.
    Box { size: f32 },
    /// Regular octahedron; `radius` is the vertex distance from center.
    Octahedron { radius: f32 },
    /// Flat circle in the local xz-plane (orbit paths). Never pickable.
    Ring { radius: f32 },
}

impl Shape {
    pub fn from_geometry(geometry: GeometryKind, size: f32) -> Self {
        match geometry {
            GeometryKind::Octahedron => Shape::Octahedron { radius: size },
            GeometryKind::Sphere => Shape::Sphere { radius: size },
            GeometryKind::Box => Shape::Box { size },
        }
    }

    /// Shader selector written into the instance buffer.
    pub fn kind_index(self) -> u32 {
        match self {
            Shape::Sphere { .. } => 0,
            Shape::Box { .. } => 1,
            Shape::Octahedron { .. } => 2,
            Shape::Ring { .. } => 3,
        }
    }

    /// Characteristic size (radius or edge length).
    pub fn extent(self) -> f32 {
        match self {
            Shape::Sphere { radius } | Shape::Octahedron { radius } | Shape::Ring { radius } => radius,
            Shape::Box { size } => size,
        }
    }
}

/// Surface parameters of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub emissive: Option<[f32; 3]>,
    /// Present only on materials that carry an emissive term.
    pub emissive_intensity: Option<f32>,
    /// Render back faces only (outline shells).
    pub back_side: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: TypeVisual::DEFAULT_OPACITY,
            emissive: None,
            emissive_intensity: None,
            back_side: false,
        }
    }
}

impl Material {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn from_visual(visual: &TypeVisual) -> Self {
        Self {
            color: rgb(visual.color),
            opacity: visual.effective_opacity(),
            emissive: visual.emissive.map(rgb),
            emissive_intensity: visual.effective_emissive_intensity(),
            back_side: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3], intensity: f32) -> Self {
        self.emissive = Some(emissive);
        self.emissive_intensity = Some(intensity);
        self
    }

    pub fn back_side(mut self) -> Self {
        self.back_side = true;
        self
    }
}

/// A drawable (or pickable) shape with its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn from_visual(visual: &TypeVisual) -> Self {
        Self {
            shape: Shape::from_geometry(visual.geometry, visual.size),
            material: Material::from_visual(visual),
        }
    }
}

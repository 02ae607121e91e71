use crate::api::types::ObjectId;
use crate::components::node::{NodeKind, SceneNode};
use crate::renderer::instance::{InstanceBuffer, MeshInstance};

/// Build the instance buffer from the scene's visible meshes.
/// Bodies first, then decorations; `decoration_split` marks the boundary.
/// Hit proxies and hidden nodes are never drawn.
pub fn build_instance_buffer<'a>(
    nodes: impl Iterator<Item = &'a SceneNode>,
    selected: Option<ObjectId>,
    buffer: &mut InstanceBuffer,
) {
    buffer.clear();

    let mut bodies: Vec<MeshInstance> = Vec::new();
    let mut decorations: Vec<MeshInstance> = Vec::new();

    for node in nodes {
        if !node.visible {
            continue;
        }
        let Some(instance) = mesh_instance(node, selected == Some(node.id)) else {
            continue;
        };
        match node.kind {
            NodeKind::Body(_) => bodies.push(instance),
            NodeKind::Outline | NodeKind::OrbitRing => decorations.push(instance),
            NodeKind::HitProxy { .. } | NodeKind::OrbitGroup => {}
        }
    }

    let split = bodies.len() as u32;
    for inst in bodies {
        buffer.push(inst);
    }
    buffer.set_decoration_split(split);
    for inst in decorations {
        buffer.push(inst);
    }
}

fn mesh_instance(node: &SceneNode, selected: bool) -> Option<MeshInstance> {
    let mesh = node.mesh.as_ref()?;
    let material = &mesh.material;
    let emissive = material.emissive.unwrap_or([0.0; 3]);

    let mut flags = 0;
    if material.back_side {
        flags |= MeshInstance::FLAG_BACK_SIDE;
    }
    if selected {
        flags |= MeshInstance::FLAG_SELECTED;
    }

    Some(MeshInstance {
        x: node.position.x,
        y: node.position.y,
        z: node.position.z,
        extent: mesh.shape.extent(),
        qx: node.orientation.x,
        qy: node.orientation.y,
        qz: node.orientation.z,
        qw: node.orientation.w,
        r: material.color[0],
        g: material.color[1],
        b: material.color[2],
        opacity: material.opacity,
        emissive_r: emissive[0],
        emissive_g: emissive[1],
        emissive_b: emissive[2],
        emissive_intensity: material.emissive_intensity.unwrap_or(0.0),
        shape: mesh.shape.kind_index() as f32,
        flags: flags as f32,
        _pad0: 0.0,
        _pad1: 0.0,
    })
}
